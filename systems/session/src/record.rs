use std::{fmt, str::FromStr, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use the_maze_core::LossReason;

use crate::settings::{Difficulty, UnknownVariant};

/// How a run strings levels together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Five levels against the clock; losing one loses the run.
    Speedrun,
    /// Ever larger levels until the player loses; scored by size and speed.
    Endless,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Speedrun => "speedrun",
            Self::Endless => "endless",
        })
    }
}

impl FromStr for GameMode {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "speedrun" => Ok(Self::Speedrun),
            "endless" => Ok(Self::Endless),
            _ => Err(UnknownVariant {
                kind: "game mode",
                value: value.to_owned(),
            }),
        }
    }
}

/// Whether the run's seed was drawn at random or supplied by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOrigin {
    /// Seed was drawn at random.
    Random,
    /// Seed was supplied by the player.
    Custom,
}

/// Key of the highscore table a run competes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighscoreCategory {
    /// Game mode of the run.
    pub mode: GameMode,
    /// Difficulty split; endless runs share a single table.
    pub difficulty: Option<Difficulty>,
    /// Where the seed came from.
    pub seed_origin: SeedOrigin,
}

impl HighscoreCategory {
    /// Resolves the category for a run.
    #[must_use]
    pub const fn new(mode: GameMode, difficulty: Difficulty, seed_origin: SeedOrigin) -> Self {
        let difficulty = match mode {
            GameMode::Speedrun => Some(difficulty),
            GameMode::Endless => None,
        };
        Self {
            mode,
            difficulty,
            seed_origin,
        }
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every planned level was won.
    Completed,
    /// A level was lost.
    Lost {
        /// One-based number of the lost level.
        level: u32,
        /// Why it was lost.
        reason: LossReason,
    },
}

/// Plain record handed to the persistence collaborator when a run ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Highscore table the run competes in.
    pub category: HighscoreCategory,
    /// Seed every level of the run was built from.
    pub seed: i64,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Logical milliseconds spent on each won level.
    pub level_times_ms: Vec<u64>,
    /// Sum of `level_times_ms`.
    pub total_time_ms: u64,
    /// Accumulated score; only endless runs are scored.
    pub score: Option<i64>,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end of the run.
    pub finished_at: DateTime<Utc>,
    /// Hex digest binding the category, seed, outcome, times and score together.
    pub token: String,
}

impl RunRecord {
    pub(crate) fn seal(
        category: HighscoreCategory,
        seed: i64,
        outcome: RunOutcome,
        level_times: &[Duration],
        score: Option<i64>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let level_times_ms: Vec<u64> = level_times
            .iter()
            .map(|time| u64::try_from(time.as_millis()).unwrap_or(u64::MAX))
            .collect();
        let total_time_ms = level_times_ms.iter().fold(0u64, |sum, time| sum.saturating_add(*time));
        let token = integrity_token(
            &category,
            seed,
            &outcome,
            &level_times_ms,
            total_time_ms,
            score,
            started_at,
            finished_at,
        );

        Self {
            category,
            seed,
            outcome,
            level_times_ms,
            total_time_ms,
            score,
            started_at,
            finished_at,
            token,
        }
    }

    /// Checks that the total matches the level times and that the token
    /// still matches every ranked field.
    #[must_use]
    pub fn verify(&self) -> bool {
        let summed = self
            .level_times_ms
            .iter()
            .fold(0u64, |sum, time| sum.saturating_add(*time));
        summed == self.total_time_ms
            && integrity_token(
                &self.category,
                self.seed,
                &self.outcome,
                &self.level_times_ms,
                self.total_time_ms,
                self.score,
                self.started_at,
                self.finished_at,
            ) == self.token
    }
}

#[allow(clippy::too_many_arguments)]
fn integrity_token(
    category: &HighscoreCategory,
    seed: i64,
    outcome: &RunOutcome,
    level_times_ms: &[u64],
    total_time_ms: u64,
    score: Option<i64>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update([
        match category.mode {
            GameMode::Speedrun => 0u8,
            GameMode::Endless => 1,
        },
        match category.seed_origin {
            SeedOrigin::Random => 0u8,
            SeedOrigin::Custom => 1,
        },
    ]);
    hasher.update(
        category
            .difficulty
            .map_or(u32::MAX, Difficulty::number)
            .to_le_bytes(),
    );
    hasher.update(seed.to_le_bytes());
    match outcome {
        RunOutcome::Completed => hasher.update([0u8]),
        RunOutcome::Lost { level, reason } => {
            hasher.update([1u8]);
            hasher.update(level.to_le_bytes());
            hasher.update(reason.to_string().as_bytes());
        }
    }
    hasher.update((level_times_ms.len() as u64).to_le_bytes());
    for time in level_times_ms {
        hasher.update(time.to_le_bytes());
    }
    hasher.update(total_time_ms.to_le_bytes());
    match score {
        Some(score) => {
            hasher.update([1u8]);
            hasher.update(score.to_le_bytes());
        }
        None => hasher.update([0u8]),
    }
    hasher.update(started_at.timestamp_millis().to_le_bytes());
    hasher.update(finished_at.timestamp_millis().to_le_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
