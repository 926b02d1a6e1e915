//! Error types for the execution engine.
//!
//! A missing catalog entry is not an error: the service returns the
//! not-found sentinel result for it, so callers can distinguish "you
//! picked something invalid" from a real engine failure.

use thiserror::Error;

/// Errors that can occur while loading catalogs or executing queries.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Database error from sqlx, propagated unmodified to the caller.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error reading a catalog file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalog JSON.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
