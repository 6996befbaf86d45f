use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::question_bank::{CreateQuestionRequest, QuestionDocument},
    error::AppError,
    services::question_bank_service,
    state::SharedState,
};

/// List the image questions ordered by `turnOrder`.
#[utoipa::path(
    get,
    path = "/api/questions",
    tag = "questions",
    responses(
        (status = 200, description = "Stored questions", body = [QuestionDocument]),
        (status = 503, description = "Question bank unavailable"),
    )
)]
pub async fn list_questions(
    State(state): State<SharedState>,
) -> Result<Json<Vec<QuestionDocument>>, AppError> {
    Ok(Json(question_bank_service::list_questions(&state).await?))
}

/// Add an image question to the bank.
#[utoipa::path(
    post,
    path = "/api/questions",
    tag = "questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question stored", body = QuestionDocument),
        (status = 400, description = "Invalid question payload"),
        (status = 503, description = "Question bank unavailable"),
    )
)]
pub async fn create_question(
    State(state): State<SharedState>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuestionDocument>), AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let created = question_bank_service::create_question(&state, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Image question bank routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/questions", get(list_questions).post(create_question))
}
