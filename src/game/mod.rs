//! Client-side game core: session state machine, question batches and the local leaderboard.

pub mod batch;
pub mod leaderboard;
pub mod local_storage;
pub mod rules;
pub mod session;
pub mod state_machine;

pub use batch::{Batch, PreparedQuestion};
pub use leaderboard::Leaderboard;
pub use local_storage::{LocalStorage, MemoryStorage, PersistenceError, ScoreStorage};
pub use rules::GameRules;
pub use session::{
    AnswerOutcome, FetchOutcome, FetchStatus, FetchTicket, GameSession, NextStep, SessionError,
};
pub use state_machine::{View, ViewEvent};
