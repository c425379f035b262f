//! Fallible setup-time operations.
//!
//! Hot-path event processing (`TapHoldCore::process`, `TapHoldCore::on_timeout`)
//! never returns `Result`: per the error-handling design, nothing in the
//! event path is retried or fatal, so recoverable conditions (pool
//! exhaustion, an unreachable transition) are logged and absorbed rather
//! than surfaced to the caller. `CoreError` is reserved for the handful of
//! operations that can be validated once, before any event ever flows
//! through the core.

use thiserror::Error;

/// Errors surfaced by fallible, non-hot-path construction.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum CoreError {
    /// A classifier template was constructed with a tap-count threshold of
    /// zero, which would make its hold/touch branch unreachable.
    #[error("tap-count threshold must be at least 1")]
    InvalidThreshold,

    /// A timeout configuration of zero was supplied where a positive
    /// duration is required (a zero-millisecond timer fires immediately
    /// and defeats the purpose of the stage it guards).
    #[error("timeout duration must be greater than zero")]
    InvalidTimeout,

    /// `LayerStack::pop` was called with no matching `push` outstanding.
    #[error("layer stack underflow: pop without a matching push")]
    LayerStackUnderflow,
}

pub type CoreResult<T> = Result<T, CoreError>;
