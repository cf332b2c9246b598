//! Error types for rs-domclean.
//!
//! A cleaning pass is not transactional: when any of these errors surfaces
//! mid-walk, the nodes visited so far stay in their cleaned state and the
//! rest of the tree is left untouched.

use std::collections::TryReserveError;

/// Error type for cleaning operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transient buffer could not be allocated.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The DOM engine refused a mutation (text replacement, node removal).
    #[error("DOM mutation failed: {0}")]
    Mutation(String),

    /// Input could not be turned into a document.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// Cleaning options could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, Error>;
