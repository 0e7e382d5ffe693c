//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration and dispatch produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Each dispatch span carries a unique dispatch ID
//! - Metrics are cheap (facade calls, no-op without a recorder)

pub mod logging;
pub mod metrics;
