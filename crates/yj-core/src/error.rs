//! Error types for the divination core.

/// Errors raised when parsing user-supplied hexagram references.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A line pattern string was not six `0`/`1` characters.
    #[error("invalid line pattern \"{0}\": expected six characters of 0 or 1")]
    InvalidPattern(String),

    /// A hexagram number outside 1-64.
    #[error("hexagram number {0} is out of range (1-64)")]
    NumberOutOfRange(u32),

    /// A line sum outside 6-9.
    #[error("invalid line value {0}: expected 6, 7, 8 or 9")]
    InvalidLineValue(u32),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
