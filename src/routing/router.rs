//! Route table: registration and lookup.
//!
//! # Responsibilities
//! - Store routes and middlewares in registration order
//! - Validate controller strings and patterns when they are registered
//! - Return every matching route or middleware, in registration order
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) anchored pattern scan (acceptable for typical route counts)
//! - All matches are returned; there is no first-match-wins
//! - No match is an empty result, not an error

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::schema::RouterConfig;
use crate::routing::controller::ControllerSpec;
use crate::routing::matcher::{normalize_method, Matcher, MethodMatcher, PathPattern, RequestTarget};
use crate::routing::path::normalize_path;
use crate::routing::types::{HandlerError, RouterResult};

/// Zero-argument middleware callback.
pub type MiddlewareFn = Arc<dyn Fn() + Send + Sync>;

/// Direct route callable.
pub type RouteFn = Arc<dyn Fn() -> Result<(), HandlerError> + Send + Sync>;

/// What a route runs when it matches.
#[derive(Clone)]
pub enum Handler {
    /// Controller target built through the registry, then an action call.
    Controller(ControllerSpec),
    /// Closure invoked directly.
    Callable { name: String, func: RouteFn },
}

impl Handler {
    /// Display name used in logs and summaries.
    pub fn name(&self) -> String {
        match self {
            Handler::Controller(spec) => spec.to_string(),
            Handler::Callable { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Controller(spec) => f.debug_tuple("Controller").field(spec).finish(),
            Handler::Callable { name, .. } => f.debug_tuple("Callable").field(name).finish(),
        }
    }
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    method: MethodMatcher,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    /// Upper-cased method.
    pub fn method(&self) -> &str {
        self.method.as_str()
    }

    /// Normalized path pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            method: self.method().to_string(),
            pattern: self.pattern().to_string(),
            handler: self.handler.name(),
        }
    }
}

impl Matcher for Route {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        self.method.matches(target) && self.pattern.matches(target)
    }
}

/// A registered middleware.
#[derive(Clone)]
pub struct Middleware {
    scope: PathPattern,
    callback: MiddlewareFn,
}

impl Middleware {
    /// Normalized path scope.
    pub fn scope(&self) -> &str {
        self.scope.as_str()
    }

    /// Run the callback.
    pub fn run(&self) {
        (self.callback)()
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").field("scope", &self.scope).finish()
    }
}

impl Matcher for Middleware {
    fn matches(&self, target: &RequestTarget<'_>) -> bool {
        self.scope.matches(target)
    }
}

/// Serializable view of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub pattern: String,
    pub handler: String,
}

/// Ordered routes and middlewares.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    middlewares: Vec<Middleware>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from configuration.
    ///
    /// `middleware_for` maps each configured middleware name to its callback.
    pub fn from_config<F>(config: &RouterConfig, mut middleware_for: F) -> RouterResult<Self>
    where
        F: FnMut(&str) -> MiddlewareFn,
    {
        let mut table = Self::new();
        for middleware in &config.middlewares {
            table.push_middleware(&middleware.path, middleware_for(&middleware.name))?;
        }
        for route in &config.routes {
            table.add_route(&route.method, &route.path, &route.controller)?;
        }
        tracing::info!(
            routes = table.routes.len(),
            middlewares = table.middlewares.len(),
            "Route table built from configuration"
        );
        Ok(table)
    }

    /// Register a route to a `Target@action` controller.
    pub fn add_route(&mut self, method: &str, path: &str, controller: &str) -> RouterResult<()> {
        let spec = ControllerSpec::parse(controller)?;
        self.push_route(method, path, Handler::Controller(spec))
    }

    /// Register a route to a closure. `name` is used in logs and listings.
    pub fn add_route_fn<F>(
        &mut self,
        method: &str,
        path: &str,
        name: impl Into<String>,
        func: F,
    ) -> RouterResult<()>
    where
        F: Fn() -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler = Handler::Callable {
            name: name.into(),
            func: Arc::new(func),
        };
        self.push_route(method, path, handler)
    }

    pub fn get(&mut self, path: &str, controller: &str) -> RouterResult<()> {
        self.add_route("GET", path, controller)
    }

    pub fn post(&mut self, path: &str, controller: &str) -> RouterResult<()> {
        self.add_route("POST", path, controller)
    }

    pub fn put(&mut self, path: &str, controller: &str) -> RouterResult<()> {
        self.add_route("PUT", path, controller)
    }

    pub fn delete(&mut self, path: &str, controller: &str) -> RouterResult<()> {
        self.add_route("DELETE", path, controller)
    }

    fn push_route(&mut self, method: &str, path: &str, handler: Handler) -> RouterResult<()> {
        let route = Route {
            method: MethodMatcher::new(method),
            pattern: PathPattern::compile(normalize_path(path))?,
            handler,
        };
        tracing::debug!(
            method = %route.method(),
            pattern = %route.pattern(),
            handler = %route.handler.name(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(())
    }

    /// Register a middleware on a path scope.
    ///
    /// Fails only if the normalized scope is not a valid pattern.
    pub fn add_middleware<F>(&mut self, path: &str, callback: F) -> RouterResult<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.push_middleware(path, Arc::new(callback))
    }

    fn push_middleware(&mut self, path: &str, callback: MiddlewareFn) -> RouterResult<()> {
        let scope = PathPattern::compile(normalize_path(path))?;
        tracing::debug!(scope = %scope.as_str(), "Middleware registered");
        self.middlewares.push(Middleware { scope, callback });
        Ok(())
    }

    /// Middlewares whose scope matches `normalized_path` exactly, in order.
    pub fn match_middlewares(&self, normalized_path: &str) -> Vec<&Middleware> {
        let target = RequestTarget::new(normalized_path, "");
        self.middlewares.iter().filter(|m| m.matches(&target)).collect()
    }

    /// Routes for `method` whose pattern matches `normalized_path`, in order.
    pub fn match_routes(&self, normalized_path: &str, method: &str) -> Vec<&Route> {
        let method = normalize_method(method);
        let target = RequestTarget::new(normalized_path, &method);
        self.routes.iter().filter(|r| r.matches(&target)).collect()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn middlewares(&self) -> impl Iterator<Item = &Middleware> {
        self.middlewares.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.middlewares.is_empty()
    }
}
