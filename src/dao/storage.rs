use std::error::Error;
use thiserror::Error;

/// Result alias for question-bank storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by question-bank backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored document could not be mapped back into an entity.
    #[error("corrupt document `{id}`: {message}")]
    Corrupt { id: String, message: String },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
