mod error;
#[cfg(test)]
pub mod fake;
pub mod opentdb;
pub mod proxy;

pub use error::{TriviaResult, TriviaSourceError};
pub use opentdb::{OpenTdbConfig, OpenTdbSource};
pub use proxy::{ProxyQuestionSource, api_base_url};

use futures::future::BoxFuture;

use crate::dao::models::TriviaQuestion;

/// Abstraction over anything able to hand out a batch of multiple-choice questions.
///
/// Every call is a fresh round trip: implementations neither retry nor cache.
pub trait QuestionSource: Send + Sync {
    fn fetch_questions(&self, amount: u32) -> BoxFuture<'static, TriviaResult<Vec<TriviaQuestion>>>;
}
