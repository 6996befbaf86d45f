//! Local high-score list.

use tracing::warn;

use super::local_storage::{PersistenceError, ScoreStorage};

/// Storage key holding the JSON-encoded score list.
pub const LEADERBOARD_KEY: &str = "trivia-rpg-leaderboard";
/// Number of scores kept.
pub const MAX_ENTRIES: usize = 10;

/// Final scores of past runs, newest first, capped at [`MAX_ENTRIES`].
pub struct Leaderboard {
    scores: Vec<u32>,
    storage: Box<dyn ScoreStorage>,
}

impl std::fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaderboard")
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}

impl Leaderboard {
    /// Read the persisted list. Missing or malformed data yields an empty leaderboard.
    pub fn load(storage: Box<dyn ScoreStorage>) -> Self {
        let scores = match storage.get_item(LEADERBOARD_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(mut scores) => {
                    scores.truncate(MAX_ENTRIES);
                    scores
                }
                Err(err) => {
                    warn!(error = %err, "ignoring malformed leaderboard data");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read leaderboard; starting empty");
                Vec::new()
            }
        };

        Self { scores, storage }
    }

    /// Scores, most recent first.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Highest recorded score.
    pub fn best(&self) -> Option<u32> {
        self.scores.iter().copied().max()
    }

    /// Record `score` as the newest entry and write the list back.
    ///
    /// The in-memory list is updated even when writing fails.
    pub fn save(&mut self, score: u32) -> Result<(), PersistenceError> {
        self.scores.insert(0, score);
        self.scores.truncate(MAX_ENTRIES);

        let encoded = serde_json::to_string(&self.scores)
            .map_err(|source| PersistenceError::Encode { source })?;
        self.storage.set_item(LEADERBOARD_KEY, &encoded)
    }
}
