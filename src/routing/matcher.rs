//! Route matching logic.
//!
//! # Responsibilities
//! - Match the normalized path against an anchored pattern
//! - Match the request method (exact, after upper-casing)
//!
//! # Design Decisions
//! - Patterns are the normalized registration path used as a regex source,
//!   compiled once as `^pattern$`
//! - Anchoring is exact: `/admin/` does not match `/admin/dashboard/`
//! - Braces only count as a repetition when they read `{n}`, `{n,}` or
//!   `{n,m}`; any other brace is literal, so `/users/{id}/` is a plain path
//! - Method strings are upper-cased on both sides before comparison

use std::fmt;

use regex::Regex;

use crate::routing::types::{RouterError, RouterResult};

/// A normalized request as seen by matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget<'a> {
    /// Normalized path.
    pub path: &'a str,
    /// Upper-cased method.
    pub method: &'a str,
}

impl<'a> RequestTarget<'a> {
    pub fn new(path: &'a str, method: &'a str) -> Self {
        Self { path, method }
    }
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, target: &RequestTarget<'_>) -> bool;
}

/// Anchored path pattern compiled from a normalized path.
#[derive(Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `^source$`.
    ///
    /// `source` is expected to already be normalized.
    pub fn compile(source: impl Into<String>) -> RouterResult<Self> {
        let source = source.into();
        let expr = escape_literal_braces(&source);
        let regex = Regex::new(&format!("^{}$", expr)).map_err(|e| RouterError::InvalidPattern {
            path: source.clone(),
            source: e,
        })?;
        Ok(Self { source, regex })
    }

    /// The normalized path this pattern was built from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, normalized_path: &str) -> bool {
        self.regex.is_match(normalized_path)
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathPattern").field(&self.source).finish()
    }
}

impl Matcher for PathPattern {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        self.is_match(target.path)
    }
}

/// Escape every brace that is not part of a `{n}`, `{n,}` or `{n,m}` repetition.
fn escape_literal_braces(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => {
                // Copy the escape and the character it applies to.
                let len = rest[1..].chars().next().map_or(0, char::len_utf8) + 1;
                out.push_str(&rest[..len]);
                rest = &rest[len..];
                continue;
            }
            '{' => match repetition_len(rest) {
                Some(len) => {
                    out.push_str(&rest[..len]);
                    rest = &rest[len..];
                    continue;
                }
                None => out.push_str("\\{"),
            },
            '}' => out.push_str("\\}"),
            _ => out.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Byte length of a repetition at the start of `s`, if there is one.
fn repetition_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = 1;
    let min = digits(i);
    if min == 0 {
        return None;
    }
    i += min;
    if bytes.get(i) == Some(&b',') {
        i += 1;
        i += digits(i);
    }
    (bytes.get(i) == Some(&b'}')).then_some(i + 1)
}

/// Matches the request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatcher {
    expected_method: String,
}

impl MethodMatcher {
    /// Create a new method matcher.
    /// The method is upper-cased for case-insensitive matching.
    pub fn new(method: &str) -> Self {
        Self {
            expected_method: normalize_method(method),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.expected_method
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        target.method == self.expected_method
    }
}

/// Upper-case a method string (ASCII only).
pub fn normalize_method(method: &str) -> String {
    method.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_pattern_is_anchored() {
        let pattern = PathPattern::compile("/admin/").unwrap();

        assert!(pattern.matches(&RequestTarget::new("/admin/", "GET")));
        assert!(!pattern.matches(&RequestTarget::new("/admin/dashboard/", "GET")));
        assert!(!pattern.matches(&RequestTarget::new("/x/admin/", "GET")));
        assert_eq!(pattern.as_str(), "/admin/");
    }

    #[test]
    fn test_path_pattern_keeps_regex_meaning() {
        // A dot in a registered path matches any character.
        let pattern = PathPattern::compile("/file.txt/").unwrap();
        assert!(pattern.is_match("/file.txt/"));
        assert!(pattern.is_match("/fileXtxt/"));
    }

    #[test]
    fn test_path_pattern_literal_braces() {
        let pattern = PathPattern::compile("/users/{id}/").unwrap();
        assert!(pattern.is_match("/users/{id}/"));
        assert!(!pattern.is_match("/users/42/"));
        assert_eq!(pattern.as_str(), "/users/{id}/");

        let pattern = PathPattern::compile("/a{/").unwrap();
        assert!(pattern.is_match("/a{/"));

        let pattern = PathPattern::compile("/a}/").unwrap();
        assert!(pattern.is_match("/a}/"));

        let pattern = PathPattern::compile("/a{1,x}/").unwrap();
        assert!(pattern.is_match("/a{1,x}/"));
    }

    #[test]
    fn test_path_pattern_keeps_repetitions() {
        assert!(PathPattern::compile("/a{2}/").unwrap().is_match("/aa/"));
        assert!(!PathPattern::compile("/a{2}/").unwrap().is_match("/a{2}/"));
        assert!(PathPattern::compile("/a{2,}/").unwrap().is_match("/aaaa/"));
        assert!(PathPattern::compile("/a{1,2}/").unwrap().is_match("/aa/"));
        // An escaped brace stays escaped.
        assert!(PathPattern::compile("/a\\{2}/").unwrap().is_match("/a{2}/"));
    }

    #[test]
    fn test_escape_literal_braces() {
        assert_eq!(escape_literal_braces("/{id}/"), "/\\{id\\}/");
        assert_eq!(escape_literal_braces("/a{3}/"), "/a{3}/");
        assert_eq!(escape_literal_braces("/a{3,5}/b{/"), "/a{3,5}/b\\{/");
        assert_eq!(escape_literal_braces("/é{/"), "/é\\{/");
    }

    #[test]
    fn test_path_pattern_rejects_invalid_regex() {
        let err = PathPattern::compile("/a(/").unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { ref path, .. } if path == "/a(/"));
    }

    #[test]
    fn test_method_matcher() {
        let matcher = MethodMatcher::new("get");
        assert_eq!(matcher.as_str(), "GET");

        assert!(matcher.matches(&RequestTarget::new("/", "GET")));
        assert!(!matcher.matches(&RequestTarget::new("/", "POST")));
        // Targets are expected to be upper-cased by the dispatcher.
        assert!(matcher.matches(&RequestTarget::new("/", &normalize_method("Get"))));
    }
}
