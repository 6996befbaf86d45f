use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoQuestionDocument, TURN_ORDER_FIELD},
};
use crate::dao::{models::QuestionEntity, question_bank::QuestionBank, storage::StorageResult};

const QUESTION_COLLECTION_NAME: &str = "questions";

#[derive(Clone)]
pub struct MongoQuestionBank {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    #[allow(dead_code)]
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoQuestionBank {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self.collection().await;
        let index = IndexModel::builder()
            .keys(doc! { TURN_ORDER_FIELD: 1 })
            .options(
                IndexOptions::builder()
                    .name(Some("question_turn_order_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: QUESTION_COLLECTION_NAME,
                index: TURN_ORDER_FIELD,
                source,
            })?;

        Ok(())
    }

    async fn collection(&self) -> Collection<MongoQuestionDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoQuestionDocument>(QUESTION_COLLECTION_NAME)
    }

    async fn list_questions(&self) -> MongoResult<Vec<QuestionEntity>> {
        let collection = self.collection().await;

        let documents: Vec<MongoQuestionDocument> = collection
            .find(doc! {})
            .sort(doc! { TURN_ORDER_FIELD: 1 })
            .await
            .map_err(|source| MongoDaoError::ListQuestions { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListQuestions { source })?;

        documents.into_iter().map(QuestionEntity::try_from).collect()
    }

    async fn create_question(&self, question: QuestionEntity) -> MongoResult<()> {
        let id = question.id.clone();
        let document: MongoQuestionDocument = question.into();
        let collection = self.collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::InsertQuestion { id, source })?;

        Ok(())
    }
}

impl QuestionBank for MongoQuestionBank {
    fn list_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_questions().await.map_err(Into::into) })
    }

    fn create_question(&self, question: QuestionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.create_question(question).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
