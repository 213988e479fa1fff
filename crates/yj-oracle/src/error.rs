//! Error types for the interpretation layer.
//!
//! None of these reach the caller of [`Interpreter`](crate::Interpreter):
//! provider and cache failures are logged and replaced by fallback content.
//! They exist so each failing piece can say what went wrong.

use thiserror::Error;

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for cache store operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors from the external interpretation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body.
        message: String,
    },

    /// The provider answered without any text.
    #[error("provider returned no text")]
    EmptyResponse,

    /// The text did not match the requested shape.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Errors from a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the backing file failed.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file did not hold a JSON object of strings.
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from a divination session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The question was empty or whitespace.
    #[error("a question is required before casting")]
    EmptyQuestion,

    /// A history file could not be read or written.
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A history file did not hold valid records.
    #[error("history format error: {0}")]
    Format(#[from] serde_json::Error),
}
