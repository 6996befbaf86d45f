//! Pass-through from the proxy endpoint to the configured trivia source.

use tracing::{debug, error};
use validator::Validate;

use crate::{
    dto::trivia::{ExternalQuestionsQuery, QuestionDto},
    error::ServiceError,
    state::SharedState,
};

/// Amount used when the query string does not specify one.
pub const DEFAULT_AMOUNT: &str = "5";

/// Resolve the requested amount, substituting [`DEFAULT_AMOUNT`] for a missing or empty value.
pub fn resolve_amount(raw: Option<&str>) -> Result<u32, ServiceError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_AMOUNT);

    raw.parse::<u32>()
        .map_err(|_| ServiceError::InvalidInput(format!("invalid amount `{raw}`")))
}

/// Fetch `amount` questions from the trivia source and relay them untouched.
pub async fn fetch_external_questions(
    state: &SharedState,
    query: ExternalQuestionsQuery,
) -> Result<Vec<QuestionDto>, ServiceError> {
    query.validate()?;
    let amount = resolve_amount(query.amount.as_deref())?;

    match state.question_source().fetch_questions(amount).await {
        Ok(questions) => {
            debug!(amount, returned = questions.len(), "relaying trivia questions");
            Ok(questions.into_iter().map(QuestionDto::from).collect())
        }
        Err(err) => {
            error!(amount, error = %err, "external question fetch failed");
            Err(err.into())
        }
    }
}
