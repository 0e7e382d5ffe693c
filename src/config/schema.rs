//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,

    /// Middleware definitions, in registration order.
    pub middlewares: Vec<MiddlewareConfig>,
}

/// A route mapping a method and path to a controller action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// HTTP method (case-insensitive).
    pub method: String,

    /// Path, normalized on registration.
    pub path: String,

    /// Controller reference, `Target@action`.
    pub controller: String,
}

/// A named middleware bound to a path scope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MiddlewareConfig {
    /// Path scope, normalized on registration. Matched exactly.
    pub path: String,

    /// Name the application resolves to a callback.
    pub name: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
