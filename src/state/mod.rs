use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{
    dao::{question_bank::QuestionBank, trivia_source::QuestionSource},
    error::ServiceError,
};

pub type SharedState = Arc<AppState>;

/// Central application state: the trivia source and the optional question-bank handle.
pub struct AppState {
    question_source: Arc<dyn QuestionSource>,
    question_bank: RwLock<Option<Arc<dyn QuestionBank>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a question bank is installed.
    pub fn new(question_source: Arc<dyn QuestionSource>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            question_source,
            question_bank: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    /// Source used by the proxy endpoint.
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        self.question_source.clone()
    }

    /// Obtain a handle to the current question bank, if one is installed.
    pub async fn question_bank(&self) -> Option<Arc<dyn QuestionBank>> {
        let guard = self.question_bank.read().await;
        guard.as_ref().cloned()
    }

    /// Like [`AppState::question_bank`], failing with [`ServiceError::Degraded`] when absent.
    pub async fn require_question_bank(&self) -> Result<Arc<dyn QuestionBank>, ServiceError> {
        self.question_bank().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new question bank implementation and leave degraded mode.
    pub async fn set_question_bank(&self, bank: Arc<dyn QuestionBank>) {
        {
            let mut guard = self.question_bank.write().await;
            *guard = Some(bank);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current question bank and enter degraded mode.
    pub async fn clear_question_bank(&self) {
        {
            let mut guard = self.question_bank.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}
