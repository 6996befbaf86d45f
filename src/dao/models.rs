use serde::{Deserialize, Serialize};

/// Multiple-choice question as delivered by the upstream trivia API.
///
/// Text fields are HTML-entity-encoded exactly as received; decoding happens
/// when a batch is prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriviaQuestion {
    /// Question prompt.
    pub question: String,
    /// The single correct answer.
    pub correct_answer: String,
    /// Wrong answers, in upstream order.
    pub incorrect_answers: Vec<String>,
    /// Upstream category label, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Upstream difficulty (`easy`, `medium`, `hard`), when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Upstream question type (always `multiple` for our requests), when provided.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TriviaQuestion {
    /// Build a question carrying only the three mandatory fields.
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
            category: None,
            difficulty: None,
            kind: None,
        }
    }
}

/// Question-bank entry persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Stable identifier for the document: a uuid for new entries, an ObjectId hex for legacy ones.
    pub id: String,
    /// Image shown alongside the question.
    pub image_url: String,
    /// Candidate answers in display order.
    pub choices: Vec<String>,
    /// The correct entry from `choices`.
    pub correct: String,
    /// Position of the question in the play order.
    pub turn_order: i64,
}
