//! Image question bank: list and create.

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::QuestionEntity,
    dto::question_bank::{CreateQuestionRequest, QuestionDocument},
    error::ServiceError,
    state::SharedState,
};

/// Return every stored question ordered by turn.
pub async fn list_questions(state: &SharedState) -> Result<Vec<QuestionDocument>, ServiceError> {
    let bank = state.require_question_bank().await?;
    let questions = bank.list_questions().await?;
    Ok(questions.into_iter().map(QuestionDocument::from).collect())
}

/// Validate and store a new question, returning the stored document.
pub async fn create_question(
    state: &SharedState,
    request: CreateQuestionRequest,
) -> Result<QuestionDocument, ServiceError> {
    request.validate()?;
    let bank = state.require_question_bank().await?;

    let CreateQuestionRequest {
        image_url,
        choices,
        correct,
        turn_order,
    } = request;

    let entity = QuestionEntity {
        id: Uuid::new_v4().to_string(),
        image_url: image_url.trim().to_owned(),
        choices,
        correct,
        turn_order,
    };

    bank.create_question(entity.clone()).await?;
    info!(id = %entity.id, turn_order = entity.turn_order, "question stored");

    Ok(entity.into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::{question_bank::memory::MemoryQuestionBank, trivia_source::fake::FakeQuestionSource},
        state::AppState,
    };

    fn request(turn_order: i64) -> CreateQuestionRequest {
        CreateQuestionRequest {
            image_url: " https://img.test/lyn.png ".into(),
            choices: vec!["Lyn".into(), "Eliwood".into(), "Hector".into()],
            correct: "Lyn".into(),
            turn_order,
        }
    }

    #[tokio::test]
    async fn degraded_without_question_bank() {
        let state = AppState::new(Arc::new(FakeQuestionSource::succeeding()));
        assert!(matches!(
            list_questions(&state).await,
            Err(ServiceError::Degraded)
        ));
        assert!(matches!(
            create_question(&state, request(0)).await,
            Err(ServiceError::Degraded)
        ));
    }

    #[tokio::test]
    async fn created_questions_are_listed_by_turn_order() {
        let state = AppState::new(Arc::new(FakeQuestionSource::succeeding()));
        let bank = MemoryQuestionBank::new();
        state.set_question_bank(Arc::new(bank.clone())).await;

        let late = create_question(&state, request(5)).await.unwrap();
        let early = create_question(&state, request(1)).await.unwrap();
        assert_eq!(late.image_url, "https://img.test/lyn.png");

        let listed = list_questions(&state).await.unwrap();
        assert_eq!(listed, vec![early, late]);
        assert_eq!(bank.stored().len(), 2);
    }

    #[tokio::test]
    async fn invalid_request_is_not_stored() {
        let state = AppState::new(Arc::new(FakeQuestionSource::succeeding()));
        let bank = MemoryQuestionBank::new();
        state.set_question_bank(Arc::new(bank.clone())).await;

        let mut bad = request(0);
        bad.correct = "Roy".into();

        assert!(matches!(
            create_question(&state, bad).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(bank.stored().is_empty());
    }
}
