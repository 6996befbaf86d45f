use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{question_bank::QuestionBank, storage::StorageError},
    state::SharedState,
};

/// Delays driving the connect/poll/reconnect cycle.
#[derive(Debug, Clone, Copy)]
pub struct SupervisorTimings {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub health_poll_interval: Duration,
    pub max_reconnect_attempts: u32,
}

impl Default for SupervisorTimings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(10),
            health_poll_interval: Duration::from_secs(5),
            max_reconnect_attempts: 3,
        }
    }
}

/// Keep a question bank connected, holding the shared state in degraded mode while it is not.
pub async fn run<F, Fut>(state: SharedState, connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn QuestionBank>, StorageError>> + Send,
{
    run_with(state, connect, SupervisorTimings::default()).await
}

/// [`run`] with explicit timings.
pub async fn run_with<F, Fut>(state: SharedState, mut connect: F, timings: SupervisorTimings)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn QuestionBank>, StorageError>> + Send,
{
    let mut delay = timings.initial_delay;

    loop {
        match connect().await {
            Ok(bank) => {
                state.set_question_bank(bank.clone()).await;
                info!("question bank connected; leaving degraded mode");
                delay = timings.initial_delay;

                while watch_health(&state, bank.as_ref(), &timings).await {}
                warn!("exhausted question bank reconnect attempts; staying in degraded mode");
            }
            Err(err) => warn!(error = %err, "question bank connection attempt failed"),
        }

        sleep(delay).await;
        delay = (delay * 2).min(timings.max_delay);
    }
}

/// Poll once. Returns `false` when the bank is lost and a fresh connection is needed.
async fn watch_health(
    state: &SharedState,
    bank: &dyn QuestionBank,
    timings: &SupervisorTimings,
) -> bool {
    if bank.health_check().await.is_ok() {
        if state.is_degraded().await {
            info!("question bank healthy again; leaving degraded mode");
            state.update_degraded(false).await;
        }
        sleep(timings.health_poll_interval).await;
        return true;
    }

    if reconnect(state, bank, timings).await {
        state.update_degraded(false).await;
        sleep(timings.health_poll_interval).await;
        true
    } else {
        false
    }
}

async fn reconnect(state: &SharedState, bank: &dyn QuestionBank, timings: &SupervisorTimings) -> bool {
    let mut backoff = timings.initial_delay;

    for attempt in 0..timings.max_reconnect_attempts {
        match bank.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "question bank reconnected after failed health check");
                return true;
            }
            Err(err) if attempt == 0 => {
                warn!(attempt, error = %err, "question bank reconnect failed; entering degraded mode");
                state.update_degraded(true).await;
            }
            Err(err) => warn!(attempt, error = %err, "question bank reconnect attempt failed"),
        }
        sleep(backoff).await;
        backoff = (backoff * 2).min(timings.max_delay);
    }

    false
}
