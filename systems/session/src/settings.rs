use std::{fmt, fs, io, path::Path, path::PathBuf, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use the_maze_core::ViewDistance;
use thiserror::Error;

/// How much of the maze the player can see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Four tiles of vision on small mazes.
    #[default]
    Easy,
    /// Three tiles of vision.
    Normal,
    /// Two tiles of vision on large mazes.
    Hard,
    /// Whole maze visible on compact, fast-growing mazes.
    FullView,
}

impl Difficulty {
    /// Every difficulty in menu order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::FullView];

    /// Difficulty number used for view distance, maze sizes and scoring.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Easy => 4,
            Self::Normal => 3,
            Self::Hard => 2,
            Self::FullView => 0,
        }
    }

    /// Player view distance granted by the difficulty.
    #[must_use]
    pub const fn view_distance(self) -> ViewDistance {
        match self {
            Self::FullView => ViewDistance::Unlimited,
            other => ViewDistance::Limited(other.number()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::FullView => "full_view",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "full_view" | "fullview" => Ok(Self::FullView),
            _ => Err(UnknownVariant {
                kind: "difficulty",
                value: value.to_owned(),
            }),
        }
    }
}

/// How quickly one-tile moves animate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSpeed {
    /// 200 ms per tile.
    Slow,
    /// 150 ms per tile.
    #[default]
    Normal,
    /// 100 ms per tile.
    Fast,
}

impl PlayerSpeed {
    /// Length of a one-tile move animation.
    #[must_use]
    pub const fn animation_length(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(200),
            Self::Normal => Duration::from_millis(150),
            Self::Fast => Duration::from_millis(100),
        }
    }
}

impl FromStr for PlayerSpeed {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "normal" => Ok(Self::Normal),
            "fast" => Ok(Self::Fast),
            _ => Err(UnknownVariant {
                kind: "player speed",
                value: value.to_owned(),
            }),
        }
    }
}

/// Returned when a name does not match any variant of a settings enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    /// Enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

/// Timing and range of the pursuers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitTuning {
    /// Milliseconds between belief refreshes.
    pub belief_refresh_ms: u64,
    /// Milliseconds between move steps.
    pub move_interval_ms: u64,
    /// Largest row or column distance at which a pursuer acts on its belief.
    pub vision: u32,
    /// Longest path, in tiles, that still sounds the alarm.
    pub alarm_path_length: usize,
}

impl PursuitTuning {
    /// Interval between belief refreshes.
    #[must_use]
    pub const fn belief_interval(&self) -> Duration {
        Duration::from_millis(self.belief_refresh_ms)
    }

    /// Interval between move steps.
    #[must_use]
    pub const fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }
}

impl Default for PursuitTuning {
    fn default() -> Self {
        Self {
            belief_refresh_ms: 9000,
            move_interval_ms: 2000,
            vision: 20,
            alarm_path_length: 30,
        }
    }
}

/// Player-facing settings of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected difficulty.
    pub difficulty: Difficulty,
    /// Selected animation speed.
    pub player_speed: PlayerSpeed,
    /// Pursuer timing and range.
    pub pursuit: PursuitTuning,
    /// Milliseconds granted to answer one quiz question.
    pub quiz_budget_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            player_speed: PlayerSpeed::default(),
            pursuit: PursuitTuning::default(),
            quiz_budget_ms: 15_000,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses settings from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed documents.
    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(contents)?)
    }

    /// Time budget granted to each quiz question.
    #[must_use]
    pub const fn quiz_budget(&self) -> Duration {
        Duration::from_millis(self.quiz_budget_ms)
    }
}

/// Failure to load a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File exists but could not be read.
    #[error("failed to read settings from {}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// File is not valid settings TOML.
    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),
}
