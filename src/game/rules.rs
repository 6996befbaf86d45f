//! Tunable constants of a game session.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound accepted by the trivia API for a single request.
pub const MAX_BATCH_SIZE: u32 = 50;

/// Balance knobs for a session: how much health a player has, how hard wrong
/// answers hit, how much a correct answer is worth and how many questions are
/// fetched at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GameRules {
    #[validate(range(min = 1))]
    pub max_health: i32,
    #[validate(range(min = 1))]
    pub damage_per_wrong: i32,
    #[validate(range(min = 1))]
    pub score_per_correct: u32,
    #[validate(range(min = 1, max = 50))]
    pub batch_size: u32,
}

impl GameRules {
    /// 100 HP, 10 damage per miss, 10 questions per batch.
    pub const fn classic() -> Self {
        Self {
            max_health: 100,
            damage_per_wrong: 10,
            score_per_correct: 100,
            batch_size: 10,
        }
    }

    /// Five hearts, one lost per miss.
    pub const fn hearts() -> Self {
        Self {
            max_health: 5,
            damage_per_wrong: 1,
            score_per_correct: 100,
            batch_size: 5,
        }
    }

    /// The first wrong answer ends the run.
    pub const fn sudden_death() -> Self {
        Self {
            max_health: 1,
            damage_per_wrong: 1,
            score_per_correct: 100,
            batch_size: 20,
        }
    }

    /// Look up a named preset (`classic`, `hearts`, `sudden_death`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "classic" => Some(Self::classic()),
            "hearts" => Some(Self::hearts()),
            "sudden_death" => Some(Self::sudden_death()),
            _ => None,
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::classic()
    }
}
