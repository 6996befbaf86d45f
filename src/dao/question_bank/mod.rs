#[cfg(test)]
pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::{models::QuestionEntity, storage::StorageResult};

/// Abstraction over the persistence layer for the image question bank.
pub trait QuestionBank: Send + Sync {
    /// All stored questions ordered by ascending `turn_order`.
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    fn create_question(&self, question: QuestionEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
