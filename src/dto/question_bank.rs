use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{dao::models::QuestionEntity, dto::validation::validate_not_blank};

/// Payload used to add an image question to the bank.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub image_url: String,
    pub choices: Vec<String>,
    /// Must be one of `choices`.
    pub correct: String,
    #[serde(default)]
    pub turn_order: i64,
}

impl Validate for CreateQuestionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_blank(&self.image_url) {
            errors.add("imageUrl", e);
        }

        if self.choices.is_empty() {
            let mut err = ValidationError::new("choices_empty");
            err.message = Some("at least one choice is required".into());
            errors.add("choices", err);
        }

        if let Err(e) = validate_not_blank(&self.correct) {
            errors.add("correct", e);
        } else if !self.choices.is_empty() && !self.choices.contains(&self.correct) {
            let mut err = ValidationError::new("correct_not_in_choices");
            err.message = Some("correct answer must be one of the choices".into());
            errors.add("correct", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Stored question as returned by the bank endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDocument {
    pub id: String,
    pub image_url: String,
    pub choices: Vec<String>,
    pub correct: String,
    pub turn_order: i64,
}

impl From<QuestionEntity> for QuestionDocument {
    fn from(value: QuestionEntity) -> Self {
        Self {
            id: value.id,
            image_url: value.image_url,
            choices: value.choices,
            correct: value.correct,
            turn_order: value.turn_order,
        }
    }
}
