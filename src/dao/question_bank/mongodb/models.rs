use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use super::error::MongoDaoError;
use crate::dao::models::QuestionEntity;

/// Field used to order the question bank.
pub const TURN_ORDER_FIELD: &str = "turnOrder";

/// Stored shape of a question, camelCase like the collection's existing documents.
///
/// New entries are written with a uuid string `_id`; documents carrying an ObjectId `_id`
/// are read as well and exposed through the ObjectId's hex form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoQuestionDocument {
    #[serde(rename = "_id")]
    id: Bson,
    image_url: String,
    choices: Vec<String>,
    correct: String,
    #[serde(default)]
    turn_order: i64,
}

impl From<QuestionEntity> for MongoQuestionDocument {
    fn from(value: QuestionEntity) -> Self {
        Self {
            id: Bson::String(value.id),
            image_url: value.image_url,
            choices: value.choices,
            correct: value.correct,
            turn_order: value.turn_order,
        }
    }
}

impl TryFrom<MongoQuestionDocument> for QuestionEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoQuestionDocument) -> Result<Self, Self::Error> {
        let id = match value.id {
            Bson::String(id) => id,
            Bson::ObjectId(oid) => oid.to_hex(),
            other => {
                return Err(MongoDaoError::CorruptDocument {
                    id: other.to_string(),
                    kind: format!("{:?}", other.element_type()),
                });
            }
        };

        Ok(Self {
            id,
            image_url: value.image_url,
            choices: value.choices,
            correct: value.correct,
            turn_order: value.turn_order,
        })
    }
}
