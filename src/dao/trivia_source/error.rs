//! Error types shared by trivia question sources.

use std::fmt::Display;

use thiserror::Error;

/// Convenient result alias returning [`TriviaSourceError`] failures.
pub type TriviaResult<T> = Result<T, TriviaSourceError>;

/// Failures that can occur while fetching a batch of questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriviaSourceError {
    /// The trivia service answered with a non-success HTTP status.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    /// The request could not be sent or the response could not be decoded.
    #[error("{message}")]
    Transport { message: String },
}

impl TriviaSourceError {
    /// Build an upstream error from a status code and message.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        TriviaSourceError::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Build a transport error from any displayable failure.
    pub fn transport(err: impl Display) -> Self {
        TriviaSourceError::Transport {
            message: err.to_string(),
        }
    }
}
