//! Error types for greenscreen operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for greenscreen operations
pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Error, Debug)]
pub enum FilterError {
    /// A precondition on an input image or parameter was violated.
    #[error("Invalid argument `{parameter}`: {reason}")]
    InvalidArgument { parameter: String, reason: String },

    #[error("Failed to load image '{path}': {message}")]
    ImageLoad { path: PathBuf, message: String },

    #[error("Failed to save image '{path}': {message}")]
    ImageSave { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FilterError {
    pub fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// True for precondition violations, which are caller bugs rather than I/O failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FilterError::InvalidArgument { .. })
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Config {
            message: err.to_string(),
        }
    }
}
