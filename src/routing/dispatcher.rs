//! Request dispatch.
//!
//! # Data Flow
//! ```text
//! dispatch(raw_path, method)
//!     → normalize path, upper-case method
//!     → run every matching middleware (registration order)
//!     → for every matching route (registration order):
//!         resolve handler → invoke
//! ```
//!
//! # Design Decisions
//! - Fully synchronous: all middlewares, then all routes, then return
//! - Middlewares cannot stop the chain
//! - The first handler failure is returned as-is; later routes do not run
//! - No route matching is a normal, silent outcome

use uuid::Uuid;

use crate::observability::metrics;
use crate::routing::matcher::normalize_method;
use crate::routing::path::normalize_path;
use crate::routing::router::{Handler, Route, RouteTable};
use crate::routing::controller::ControllerRegistry;
use crate::routing::types::{DispatchError, DispatchResult, DispatchSummary};

/// Resolves requests against a frozen route table.
///
/// `Send + Sync`: share it behind an `Arc` to dispatch from many threads.
#[derive(Debug)]
pub struct Dispatcher {
    table: RouteTable,
    controllers: ControllerRegistry,
}

impl Dispatcher {
    /// Freeze `table` and pair it with the controllers its routes reference.
    pub fn new(table: RouteTable, controllers: ControllerRegistry) -> Self {
        Self { table, controllers }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    /// Controller targets referenced by routes but absent from the registry.
    ///
    /// Deduplicated, in first-reference order.
    pub fn unresolved_targets(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for route in self.table.routes() {
            if let Handler::Controller(spec) = route.handler() {
                let target = spec.target();
                if !self.controllers.contains(target) && !missing.contains(&target) {
                    missing.push(target);
                }
            }
        }
        missing
    }

    /// Dispatch one request.
    pub fn dispatch(&self, raw_path: &str, method: &str) -> DispatchResult<DispatchSummary> {
        let path = normalize_path(raw_path);
        let method = normalize_method(method);

        let span = tracing::debug_span!(
            "dispatch",
            dispatch_id = %Uuid::new_v4(),
            method = %method,
            path = %path,
        );
        let _enter = span.enter();

        metrics::record_dispatch(&method);

        let middlewares = self.table.match_middlewares(&path);
        for middleware in &middlewares {
            tracing::trace!(scope = %middleware.scope(), "Running middleware");
            middleware.run();
        }

        let routes = self.table.match_routes(&path, &method);
        if routes.is_empty() {
            tracing::debug!("No route matched");
            metrics::record_no_match(&method);
        }

        for route in &routes {
            self.invoke(route).map_err(|e| {
                tracing::warn!(handler = %route.handler().name(), error = %e, "Handler failed");
                metrics::record_handler_failure(&route.handler().name());
                e
            })?;
            metrics::record_handler_invoked(&method);
        }

        tracing::debug!(
            middlewares = middlewares.len(),
            handlers = routes.len(),
            "Dispatch complete"
        );

        Ok(DispatchSummary {
            path,
            method,
            middlewares_run: middlewares.len(),
            handlers_invoked: routes.len(),
        })
    }

    fn invoke(&self, route: &Route) -> DispatchResult<()> {
        match route.handler() {
            Handler::Controller(spec) => {
                let target = spec.target();
                let mut controller = self
                    .controllers
                    .instantiate(target)
                    .ok_or_else(|| DispatchError::UnknownController(target.to_string()))?
                    .map_err(|source| DispatchError::Instantiation {
                        target: target.to_string(),
                        source,
                    })?;

                tracing::trace!(controller = %spec, "Invoking controller action");
                controller
                    .call(spec.action())
                    .map_err(|source| DispatchError::Handler {
                        handler: spec.to_string(),
                        source,
                    })
            }
            Handler::Callable { name, func } => {
                tracing::trace!(handler = %name, "Invoking callable");
                func().map_err(|source| DispatchError::Handler {
                    handler: name.clone(),
                    source,
                })
            }
        }
    }
}
