use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::trivia::{ExternalQuestionsQuery, QuestionDto},
    error::AppError,
    services::trivia_service,
    state::SharedState,
};

/// Relay a batch of multiple-choice questions from the trivia service.
#[utoipa::path(
    get,
    path = "/api/external-questions",
    tag = "trivia",
    params(ExternalQuestionsQuery),
    responses(
        (status = 200, description = "Questions returned by the trivia service", body = [QuestionDto]),
        (status = 400, description = "Amount is not a whole number"),
        (status = 500, description = "Trivia service unreachable or returned a malformed body"),
    )
)]
pub async fn external_questions(
    State(state): State<SharedState>,
    Query(query): Query<ExternalQuestionsQuery>,
) -> Result<Json<Vec<QuestionDto>>, AppError> {
    Ok(Json(
        trivia_service::fetch_external_questions(&state, query).await?,
    ))
}

/// Proxy routes in front of the trivia service.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/external-questions", get(external_questions))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        dao::trivia_source::{TriviaSourceError, fake::FakeQuestionSource},
        routes,
        state::AppState,
    };

    async fn get(source: FakeQuestionSource, uri: &str) -> (StatusCode, Value) {
        let app = routes::router(AppState::new(Arc::new(source)));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn default_amount_is_five() {
        let source = FakeQuestionSource::succeeding();
        let (status, body) = get(source.clone(), "/api/external-questions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(5));
        assert_eq!(source.requests(), vec![5]);
    }

    #[tokio::test]
    async fn questions_keep_the_upstream_shape() {
        let (status, body) =
            get(FakeQuestionSource::succeeding(), "/api/external-questions?amount=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["question"], "Which hero is number 0?");
        assert_eq!(body[0]["correct_answer"], "Marth");
        assert_eq!(body[1]["incorrect_answers"][2], "Lucina");
    }

    #[tokio::test]
    async fn upstream_status_is_relayed() {
        let source = FakeQuestionSource::failing(TriviaSourceError::upstream(
            429,
            "Upstream error: 429 Too Many Requests",
        ));
        let (status, body) = get(source, "/api/external-questions?amount=3").await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Upstream error: 429 Too Many Requests");
    }

    #[tokio::test]
    async fn transport_failure_is_a_server_error() {
        let source =
            FakeQuestionSource::failing(TriviaSourceError::transport("connection refused"));
        let (status, body) = get(source, "/api/external-questions?amount=3").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "connection refused");
    }

    #[tokio::test]
    async fn amount_is_forwarded_without_range_check() {
        let source = FakeQuestionSource::succeeding();
        let (status, body) = get(source.clone(), "/api/external-questions?amount=51").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(51));

        let (status, body) = get(source.clone(), "/api/external-questions?amount=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));

        assert_eq!(source.requests(), vec![51, 0]);
    }

    #[tokio::test]
    async fn upstream_rejection_of_amount_is_relayed() {
        let source = FakeQuestionSource::failing(TriviaSourceError::upstream(
            400,
            "Upstream error: 400 Bad Request",
        ));
        let (status, body) = get(source.clone(), "/api/external-questions?amount=500").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Upstream error: 400 Bad Request");
        assert_eq!(source.requests(), vec![500]);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected() {
        let source = FakeQuestionSource::succeeding();
        let (status, body) = get(source.clone(), "/api/external-questions?amount=five").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(source.requests().is_empty());
    }
}
