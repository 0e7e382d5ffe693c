//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check controller strings and path patterns before any table is built
//! - Validate observability settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::RouterConfig;
use crate::routing::controller::ControllerSpec;
use crate::routing::matcher::PathPattern;
use crate::routing::path::normalize_path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Route method is empty or not an HTTP token.
    InvalidMethod { route: usize, method: String },
    /// Route controller is not `Target@action`.
    InvalidController { route: usize, controller: String },
    /// Route path does not compile as a pattern.
    InvalidRoutePath { route: usize, path: String },
    /// Middleware scope does not compile as a pattern.
    InvalidMiddlewarePath { middleware: usize, path: String },
    /// Middleware has no name.
    EmptyMiddlewareName { middleware: usize },
    /// Unknown log level.
    InvalidLogLevel(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidMethod { route, method } => {
                write!(f, "routes[{}]: invalid method {:?}", route, method)
            }
            ValidationError::InvalidController { route, controller } => write!(
                f,
                "routes[{}]: invalid controller {:?}, expected 'Target@action'",
                route, controller
            ),
            ValidationError::InvalidRoutePath { route, path } => {
                write!(f, "routes[{}]: path {:?} is not a valid pattern", route, path)
            }
            ValidationError::InvalidMiddlewarePath { middleware, path } => write!(
                f,
                "middlewares[{}]: path {:?} is not a valid pattern",
                middleware, path
            ),
            ValidationError::EmptyMiddlewareName { middleware } => {
                write!(f, "middlewares[{}]: name must not be empty", middleware)
            }
            ValidationError::InvalidLogLevel(level) => {
                write!(f, "observability.log_level: unknown level {:?}", level)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (i, route) in config.routes.iter().enumerate() {
        if !is_method_token(&route.method) {
            errors.push(ValidationError::InvalidMethod {
                route: i,
                method: route.method.clone(),
            });
        }
        if ControllerSpec::parse(&route.controller).is_err() {
            errors.push(ValidationError::InvalidController {
                route: i,
                controller: route.controller.clone(),
            });
        }
        if PathPattern::compile(normalize_path(&route.path)).is_err() {
            errors.push(ValidationError::InvalidRoutePath {
                route: i,
                path: route.path.clone(),
            });
        }
    }

    for (i, middleware) in config.middlewares.iter().enumerate() {
        if middleware.name.trim().is_empty() {
            errors.push(ValidationError::EmptyMiddlewareName { middleware: i });
        }
        if PathPattern::compile(normalize_path(&middleware.path)).is_err() {
            errors.push(ValidationError::InvalidMiddlewarePath {
                middleware: i,
                path: middleware.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 9110 token characters.
fn is_method_token(method: &str) -> bool {
    !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{MiddlewareConfig, RouteConfig};

    fn route(method: &str, path: &str, controller: &str) -> RouteConfig {
        RouteConfig {
            method: method.into(),
            path: path.into(),
            controller: controller.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route("get", "/", "A@index"));
        config.middlewares.push(MiddlewareConfig {
            path: "/admin".into(),
            name: "audit".into(),
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.observability.log_level = "loud".into();
        config.routes.push(route("", "/", "A@index"));
        config.routes.push(route("GET", "/a(", "A@b@c"));
        config.middlewares.push(MiddlewareConfig {
            path: "/admin".into(),
            name: " ".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidLogLevel("loud".into()),
                ValidationError::InvalidMethod { route: 0, method: "".into() },
                ValidationError::InvalidController { route: 1, controller: "A@b@c".into() },
                ValidationError::InvalidRoutePath { route: 1, path: "/a(".into() },
                ValidationError::EmptyMiddlewareName { middleware: 0 },
            ]
        );
    }

    #[test]
    fn test_method_tokens() {
        assert!(is_method_token("GET"));
        assert!(is_method_token("purge"));
        assert!(is_method_token("M-SEARCH"));
        assert!(!is_method_token(""));
        assert!(!is_method_token("GE T"));
    }
}
