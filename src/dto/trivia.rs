use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use crate::{dao::models::TriviaQuestion, dto::validation::validate_amount};

/// Query string accepted by `/api/external-questions`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExternalQuestionsQuery {
    /// Number of questions to fetch, forwarded to the trivia service. Defaults to 5.
    pub amount: Option<String>,
}

impl Validate for ExternalQuestionsQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(ref amount) = self.amount {
            if let Err(e) = validate_amount(amount) {
                errors.add("amount", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Multiple-choice question relayed from the trivia service.
///
/// Text is HTML-entity-encoded, exactly as the upstream sent it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct QuestionDto {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl From<TriviaQuestion> for QuestionDto {
    fn from(value: TriviaQuestion) -> Self {
        Self {
            question: value.question,
            correct_answer: value.correct_answer,
            incorrect_answers: value.incorrect_answers,
            category: value.category,
            difficulty: value.difficulty,
            kind: value.kind,
        }
    }
}
