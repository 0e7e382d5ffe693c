//! Routing types and error definitions.

use serde::Serialize;
use thiserror::Error;

/// Boxed error returned by handler code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a route table.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Controller string is not of the form `Target@action`.
    #[error("Invalid controller format `{0}`. Use 'Target@action'")]
    InvalidControllerSpec(String),

    /// Normalized path does not compile as a pattern.
    #[error("Invalid route pattern `{path}`: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for route registration.
pub type RouterResult<T> = Result<T, RouterError>;

/// Outcome of a controller action or a direct route callable.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The controller has no action by this name.
    #[error("Unknown action `{0}`")]
    UnknownAction(String),

    /// The action ran and failed.
    #[error(transparent)]
    Failed(#[from] BoxError),
}

impl HandlerError {
    /// Wrap any error as a failed action.
    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(err.into())
    }
}

/// Errors surfaced by [`Dispatcher::dispatch`](super::dispatcher::Dispatcher::dispatch).
///
/// Any of these halts the dispatch: routes after the failing one are not run.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No factory is registered for the controller target.
    #[error("Controller `{0}` is not registered")]
    UnknownController(String),

    /// The controller factory itself failed.
    #[error("Failed to instantiate controller `{target}`: {source}")]
    Instantiation {
        target: String,
        #[source]
        source: BoxError,
    },

    /// The handler ran and returned an error.
    #[error("Handler `{handler}` failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: HandlerError,
    },
}

/// Result type for dispatch.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// What a completed dispatch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    /// Normalized request path.
    pub path: String,
    /// Upper-cased request method.
    pub method: String,
    /// Number of middleware callbacks run.
    pub middlewares_run: usize,
    /// Number of route handlers invoked.
    pub handlers_invoked: usize,
}

impl DispatchSummary {
    /// True when no route matched.
    pub fn is_no_match(&self) -> bool {
        self.handlers_invoked == 0
    }
}
