//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     add_route(method, path, "Target@action") / add_middleware(path, callback)
//!     → path.rs (normalize path)
//!     → controller.rs (parse controller string, fail fast)
//!     → matcher.rs (compile anchored pattern)
//!     → router.rs (append to RouteTable)
//!     → Freeze inside a Dispatcher
//!
//! Incoming Request (method, path):
//!     → dispatcher.rs (normalize, run middlewares, run routes)
//!     → controller.rs (instantiate target, call action)
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - Registration order is both match order and invocation order
//! - Every matching route runs (no first-match-wins)
//! - Middleware scopes match exactly, never by prefix

pub mod controller;
pub mod dispatcher;
pub mod matcher;
pub mod path;
pub mod router;
pub mod types;

pub use controller::{Controller, ControllerRegistry, ControllerSpec};
pub use dispatcher::Dispatcher;
pub use path::normalize_path;
pub use router::{Handler, Middleware, Route, RouteSummary, RouteTable};
pub use types::{DispatchError, DispatchSummary, HandlerError, RouterError};
