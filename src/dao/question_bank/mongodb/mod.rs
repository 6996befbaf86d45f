mod config;
mod connection;
mod error;
mod models;
mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoQuestionBank;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::CorruptDocument { id, kind } => StorageError::Corrupt {
                id,
                message: format!("unsupported identifier type {kind}"),
            },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
