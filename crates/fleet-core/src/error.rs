//! Core error type.
//!
//! Sub-crates define their own error enums and wrap the lower layers with
//! `#[from]`, so `CoreError` only covers what `fleet-core` itself can fail on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
