//! Error types shared by the optical crates

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating, embedding or rendering
#[derive(Debug, Error)]
pub enum VizError {
    /// A precondition on the caller's arguments was violated
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing a figure to disk failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image encoder rejected the canvas
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// An embedding strategy failed or returned malformed coordinates
    #[error("{algorithm} embedding failed: {message}")]
    Embedding { algorithm: String, message: String },
}

impl VizError {
    /// Shorthand for [`VizError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        VizError::InvalidArgument(message.into())
    }

    /// Whether this error is a precondition violation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, VizError::InvalidArgument(_))
    }
}

/// Result type for optical operations
pub type VizResult<T> = Result<T, VizError>;
