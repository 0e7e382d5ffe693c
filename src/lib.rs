//! HTTP request router library.
//!
//! Maps a method and path to registered handlers, running path-scoped
//! middlewares first.
//!
//! ```
//! use request_router::{ControllerRegistry, Dispatcher, RouteTable};
//! use request_router::routing::{Controller, HandlerError};
//!
//! struct Home;
//!
//! impl Controller for Home {
//!     fn call(&mut self, action: &str) -> Result<(), HandlerError> {
//!         match action {
//!             "index" => Ok(()),
//!             other => Err(HandlerError::UnknownAction(other.to_string())),
//!         }
//!     }
//! }
//!
//! let mut table = RouteTable::new();
//! table.get("/", "Home@index").unwrap();
//!
//! let mut controllers = ControllerRegistry::new();
//! controllers.register("Home", || Home);
//!
//! let dispatcher = Dispatcher::new(table, controllers);
//! let summary = dispatcher.dispatch("/", "get").unwrap();
//! assert_eq!(summary.handlers_invoked, 1);
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use routing::{ControllerRegistry, Dispatcher, RouteTable};
