//! Client for the Open Trivia Database (`opentdb.com`).

use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{QuestionSource, TriviaResult, TriviaSourceError};
use crate::dao::models::TriviaQuestion;

/// Public OpenTDB host.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
/// OpenTDB category 15 is "Entertainment: Video Games".
pub const DEFAULT_CATEGORY: u32 = 15;

/// Runtime configuration describing how to reach the trivia API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub category: u32,
    /// Overall request timeout; `None` waits for as long as the upstream takes.
    pub timeout: Option<Duration>,
}

impl OpenTdbConfig {
    /// Construct a configuration pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request questions from another category.
    pub fn with_category(mut self, category: u32) -> Self {
        self.category = category;
        self
    }

    /// Abort requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            category: DEFAULT_CATEGORY,
            timeout: None,
        }
    }
}

/// Envelope returned by `api.php`.
#[derive(Debug, Deserialize)]
struct OpenTdbEnvelope {
    #[serde(default)]
    response_code: u8,
    results: Vec<TriviaQuestion>,
}

/// [`QuestionSource`] backed by the OpenTDB HTTP API.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    base_url: Arc<str>,
    category: u32,
}

impl OpenTdbSource {
    /// Build the HTTP client for the given configuration.
    pub fn new(config: OpenTdbConfig) -> TriviaResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TriviaSourceError::transport)?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            category: config.category,
        })
    }

    fn questions_url(&self, amount: u32) -> String {
        format!(
            "{}/api.php?amount={}&category={}&type=multiple",
            self.base_url, amount, self.category
        )
    }

    async fn fetch(&self, amount: u32) -> TriviaResult<Vec<TriviaQuestion>> {
        let url = self.questions_url(amount);
        debug!(%url, "requesting questions from upstream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TriviaSourceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.canonical_reason() {
                Some(reason) => format!("Upstream error: {} {}", status.as_u16(), reason),
                None => format!("Upstream error: {}", status.as_u16()),
            };
            return Err(TriviaSourceError::upstream(status.as_u16(), message));
        }

        let envelope = response
            .json::<OpenTdbEnvelope>()
            .await
            .map_err(TriviaSourceError::transport)?;

        if envelope.response_code != 0 {
            warn!(
                response_code = envelope.response_code,
                amount,
                returned = envelope.results.len(),
                "upstream reported a non-zero response code"
            );
        }

        Ok(envelope.results)
    }
}

impl QuestionSource for OpenTdbSource {
    fn fetch_questions(&self, amount: u32) -> BoxFuture<'static, TriviaResult<Vec<TriviaQuestion>>> {
        let source = self.clone();
        Box::pin(async move { source.fetch(amount).await })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn_upstream(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn echo_amount(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        assert_eq!(params.get("category").map(String::as_str), Some("15"));
        assert_eq!(params.get("type").map(String::as_str), Some("multiple"));
        let amount: usize = params["amount"].parse().unwrap();
        let results: Vec<_> = (0..amount)
            .map(|i| {
                json!({
                    "type": "multiple",
                    "difficulty": "easy",
                    "category": "Entertainment: Video Games",
                    "question": format!("Question &quot;{i}&quot;?"),
                    "correct_answer": "Right",
                    "incorrect_answers": ["A", "B", "C"],
                })
            })
            .collect();
        Json(json!({ "response_code": 0, "results": results }))
    }

    #[test]
    fn builds_url_without_duplicate_slash() {
        let source = OpenTdbSource::new(OpenTdbConfig::new("https://example.test/")).unwrap();
        assert_eq!(
            source.questions_url(7),
            "https://example.test/api.php?amount=7&category=15&type=multiple"
        );
    }

    #[test]
    fn envelope_defaults_missing_response_code() {
        let envelope: OpenTdbEnvelope = serde_json::from_value(json!({
            "results": [{
                "question": "Q",
                "correct_answer": "A",
                "incorrect_answers": ["B", "C", "D"]
            }]
        }))
        .unwrap();
        assert_eq!(envelope.response_code, 0);
        assert_eq!(envelope.results[0].kind, None);
    }

    #[tokio::test]
    async fn returns_results_on_success() {
        let base = spawn_upstream(Router::new().route("/api.php", get(echo_amount))).await;
        let source = OpenTdbSource::new(OpenTdbConfig::new(base)).unwrap();

        let questions = source.fetch_questions(3).await.unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].question, "Question &quot;0&quot;?");
        assert_eq!(questions[0].kind.as_deref(), Some("multiple"));
    }

    #[tokio::test]
    async fn maps_non_success_status_to_upstream_error() {
        let router = Router::new().route(
            "/api.php",
            get(|| async { StatusCode::TOO_MANY_REQUESTS }),
        );
        let base = spawn_upstream(router).await;
        let source = OpenTdbSource::new(OpenTdbConfig::new(base)).unwrap();

        let err = source.fetch_questions(5).await.unwrap_err();

        assert_eq!(
            err,
            TriviaSourceError::upstream(429, "Upstream error: 429 Too Many Requests")
        );
    }

    #[tokio::test]
    async fn maps_malformed_body_to_transport_error() {
        let router = Router::new().route("/api.php", get(|| async { "not json" }));
        let base = spawn_upstream(router).await;
        let source = OpenTdbSource::new(OpenTdbConfig::new(base)).unwrap();

        let err = source.fetch_questions(5).await.unwrap_err();

        assert!(matches!(err, TriviaSourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = OpenTdbSource::new(OpenTdbConfig::new(format!("http://{addr}"))).unwrap();

        let err = source.fetch_questions(5).await.unwrap_err();

        assert!(matches!(err, TriviaSourceError::Transport { .. }));
    }
}
