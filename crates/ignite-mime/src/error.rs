//! Error types for envelope operations.

/// Result type alias for envelope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Envelope error types.
///
/// Envelope parsing and header mutation are total and never produce an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Builder input was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Content-Type value could not be parsed.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),
}
