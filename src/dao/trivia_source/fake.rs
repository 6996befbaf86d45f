//! In-process question sources for tests.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use super::{QuestionSource, TriviaResult, TriviaSourceError};
use crate::dao::models::TriviaQuestion;

/// Answers every request with `amount` copies of a fixed question, or with a fixed error.
#[derive(Clone, Default)]
pub struct FakeQuestionSource {
    failure: Option<TriviaSourceError>,
    requests: Arc<Mutex<Vec<u32>>>,
}

impl FakeQuestionSource {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(err: TriviaSourceError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    /// Amounts requested so far, in call order.
    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }

    pub fn question(i: u32) -> TriviaQuestion {
        TriviaQuestion::new(
            format!("Which hero is number {i}?"),
            "Marth",
            ["Roy", "Ike", "Lucina"],
        )
    }
}

impl QuestionSource for FakeQuestionSource {
    fn fetch_questions(&self, amount: u32) -> BoxFuture<'static, TriviaResult<Vec<TriviaQuestion>>> {
        self.requests.lock().unwrap().push(amount);
        let result = match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok((0..amount).map(Self::question).collect()),
        };
        Box::pin(async move { result })
    }
}
