//! Client-side adapter that talks to this crate's own proxy endpoint.

use std::{env, sync::Arc};

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{QuestionSource, TriviaResult, TriviaSourceError};
use crate::dao::models::TriviaQuestion;

/// Proxy base used when `NEXT_PUBLIC_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Resolve the proxy base URL from the environment.
pub fn api_base_url() -> String {
    env::var(API_URL_ENV)
        .ok()
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

/// [`QuestionSource`] that fetches batches through `GET /api/external-questions`.
#[derive(Clone)]
pub struct ProxyQuestionSource {
    client: Client,
    base_url: Arc<str>,
}

impl ProxyQuestionSource {
    /// Client for the proxy served at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> TriviaResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(TriviaSourceError::transport)?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
        })
    }

    fn questions_url(&self, amount: u32) -> String {
        format!("{}/api/external-questions?amount={}", self.base_url, amount)
    }

    async fn fetch(&self, amount: u32) -> TriviaResult<Vec<TriviaQuestion>> {
        let url = self.questions_url(amount);
        debug!(%url, "requesting batch from proxy");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TriviaSourceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorPayload>().await {
                Ok(payload) => payload.error,
                Err(_) => format!("Proxy error: {}", status.as_u16()),
            };
            return Err(TriviaSourceError::upstream(status.as_u16(), message));
        }

        response
            .json::<Vec<TriviaQuestion>>()
            .await
            .map_err(TriviaSourceError::transport)
    }
}

impl QuestionSource for ProxyQuestionSource {
    fn fetch_questions(&self, amount: u32) -> BoxFuture<'static, TriviaResult<Vec<TriviaQuestion>>> {
        let source = self.clone();
        Box::pin(async move { source.fetch(amount).await })
    }
}
