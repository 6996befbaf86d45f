//! Volatile question bank used by tests.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use super::QuestionBank;
use crate::dao::{models::QuestionEntity, storage::StorageResult};

#[derive(Clone, Default)]
pub struct MemoryQuestionBank {
    questions: Arc<Mutex<Vec<QuestionEntity>>>,
}

impl MemoryQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<QuestionEntity> {
        self.questions.lock().unwrap().clone()
    }
}

impl QuestionBank for MemoryQuestionBank {
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let mut questions = self.stored();
        questions.sort_by_key(|q| q.turn_order);
        Box::pin(async move { Ok(questions) })
    }

    fn create_question(&self, question: QuestionEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.questions.lock().unwrap().push(question);
        Box::pin(async { Ok(()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
