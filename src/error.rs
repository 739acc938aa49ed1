//! Error types for the spellcore library.
//!
//! Search operations themselves are total and never fail. Errors only come
//! from the edges of the engine: reading dictionaries and texts, building
//! thread pools, validating arguments and writing JSON output. All of them are
//! represented by the [`SpellError`] enum.
//!
//! # Examples
//!
//! ```
//! use spellcore::error::{SpellError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellError::invalid_argument("max distance too large"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for spellcore operations.
#[derive(Error, Debug)]
pub enum SpellError {
    /// I/O errors (dictionary or text files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dictionary loading errors
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal errors (thread pool construction, etc.)
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpellError.
pub type Result<T> = std::result::Result<T, SpellError>;

impl SpellError {
    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        SpellError::Dictionary(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellError::InvalidArgument(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SpellError::Internal(msg.into())
    }
}
