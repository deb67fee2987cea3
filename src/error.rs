//! Error types for the snake Q-learning crate

use thiserror::Error;

/// Main error type for the snake Q-learning crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("state index {index} is out of range (state space has {size} states)")]
    StateOutOfRange { index: usize, size: usize },

    #[error("observation has an empty snake body")]
    EmptyBody,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid stored model: {reason}")]
    InvalidModel { reason: String },

    /// Raised by [`Environment`](crate::ports::Environment) implementations
    #[error("environment error: {message}")]
    Environment { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
