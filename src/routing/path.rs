//! Path normalization.
//!
//! Every path that enters the router, whether at registration or dispatch,
//! goes through [`normalize_path`] first. The canonical form has exactly one
//! leading and one trailing slash and no repeated slashes anywhere:
//!
//! ```text
//! ""               → "/"
//! "about"          → "/about/"
//! "//about//foo//" → "/about/foo/"
//! ```

/// Canonicalize a raw path string.
///
/// Total over all inputs and idempotent.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    let mut normalized = String::with_capacity(trimmed.len() + 2);
    normalized.push('/');
    for c in trimmed.chars() {
        if c == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(c);
    }
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
