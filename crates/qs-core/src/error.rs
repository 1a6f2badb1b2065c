//! Framework error type.
//!
//! Only configuration boundaries can fail.  The tick path absorbs every
//! degenerate input locally and never returns an error.

use thiserror::Error;

/// The top-level error type for `qs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum QsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid {name}: {value}")]
    InvalidParameter {
        name:  &'static str,
        value: f64,
    },
}

/// Shorthand result type for all `qs-*` crates.
pub type QsResult<T> = Result<T, QsError>;
