//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap foreign errors as
//! `#[from]` variants; `CoreError` only covers what `relay-core` itself can
//! reject.

use thiserror::Error;

/// The top-level error type for `relay-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `relay-core`.
pub type CoreResult<T> = Result<T, CoreError>;
