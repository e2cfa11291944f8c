//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `pisr-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("turn radius must be finite and positive, got {0}")]
    InvalidTurnRadius(f64),

    #[error("no feasible Dubins word for the requested poses")]
    NoDubinsPath,
}

/// Shorthand result type for `pisr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
