//! Error types for the command-line tool.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a file (or a standard stream) failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Offending path; `-` for standard input/output.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The envelope library rejected the input.
    #[error(transparent)]
    Envelope(#[from] ignite_mime::Error),

    /// Rendering the parsed envelope failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type alias using [`CliError`].
pub type CliResult<T> = std::result::Result<T, CliError>;
