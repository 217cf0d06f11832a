#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Run orchestration: one seeded random stream feeding a sequence of levels.
//!
//! A [`Session`] owns the run's RNG and the current [`Level`]. Each call to
//! [`Session::tick`] advances logical time, lets the pursuit and rules systems
//! react, and moves on to the next level once the current one is won. The
//! session never sleeps or reads a clock for gameplay; callers decide how
//! much time a tick represents.

mod record;
mod route;
mod settings;

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use the_maze_core::{Command, Direction, Event, LevelStatus, LossReason, MazeError, Quiz};
use the_maze_system_maze_generation as maze_generation;
use the_maze_system_pursuit::{Config as PursuitConfig, Pursuit};
use the_maze_system_rules::Rules;
use the_maze_world::{self as world, query, Level, LevelConfig, Maze};
use thiserror::Error;
use tracing::info;

pub use record::{GameMode, HighscoreCategory, RunOutcome, RunRecord, SeedOrigin};
pub use route::{estimate_route, RouteEstimate};
pub use settings::{
    Difficulty, PlayerSpeed, PursuitTuning, Settings, SettingsError, UnknownVariant,
};

/// Number of levels in a speedrun.
pub const SPEEDRUN_LEVELS: u32 = 5;

const ENDLESS_FIRST: (u32, u32) = (11, 7);
const ENDLESS_LARGEST: (u32, u32) = (67, 35);

/// Maze size of the zero-based `index`th level of a run.
#[must_use]
pub fn level_dimensions(mode: GameMode, difficulty: Difficulty, index: u32) -> (u32, u32) {
    match mode {
        GameMode::Speedrun => {
            let ((width, height), (grow_x, grow_y)) = match difficulty {
                Difficulty::FullView => ((15, 9), (12, 6)),
                other => {
                    let n = other.number();
                    ((91 - 20 * n, 47 - 10 * n), (4, 2))
                }
            };
            (width + grow_x * index, height + grow_y * index)
        }
        GameMode::Endless => (
            (ENDLESS_FIRST.0 + 4 * index).min(ENDLESS_LARGEST.0),
            (ENDLESS_FIRST.1 + 2 * index).min(ENDLESS_LARGEST.1),
        ),
    }
}

/// Failure that aborts a run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Generation or pathfinding hit a structural error.
    #[error("maze state is unusable")]
    Maze(#[from] MazeError),
}

/// Choice made in the pause menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSelection {
    /// Continue playing.
    Resume,
    /// Abandon the level, losing the run.
    GiveUp,
    /// Change the player speed; applies to the next animation.
    PlayerSpeed(PlayerSpeed),
}

/// Input gathered by the presentation layer for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Most recent directional intent.
    pub direction: Option<Direction>,
    /// Pause key was pressed; toggles back to playing while paused.
    pub pause: bool,
    /// Menu choice, only honoured while paused.
    pub menu: Option<MenuSelection>,
}

/// What a tick did to the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Current level is still running or paused.
    Continuing,
    /// Previous level was won and a new one has been built.
    LevelStarted {
        /// One-based number of the new level.
        number: u32,
        /// Columns of the new maze.
        width: u32,
        /// Rows of the new maze.
        height: u32,
    },
    /// Run is over; [`Session::record`] holds the result.
    Finished,
}

/// A run of consecutive levels drawn from one seed.
#[derive(Debug)]
pub struct Session {
    mode: GameMode,
    settings: Settings,
    seed: i64,
    seed_origin: SeedOrigin,
    rng: ChaCha8Rng,
    level_limit: Option<u32>,
    level_number: u32,
    dimensions: (u32, u32),
    level: Level,
    pursuit: Pursuit,
    rules: Rules,
    level_times: Vec<Duration>,
    score: f64,
    started_at: DateTime<Utc>,
    record: Option<RunRecord>,
}

impl Session {
    /// Starts a run and builds its first level.
    ///
    /// Without a `seed` one is drawn at random. Speedruns last at most
    /// [`SPEEDRUN_LEVELS`] levels; `level_limit` can shorten either mode.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Maze`] if the first level cannot be built.
    pub fn start(
        mode: GameMode,
        settings: Settings,
        seed: Option<i64>,
        level_limit: Option<u32>,
    ) -> Result<Self, SessionError> {
        let (seed, seed_origin) = match seed {
            Some(seed) => (seed, SeedOrigin::Custom),
            None => (rand::random::<i64>(), SeedOrigin::Random),
        };
        let level_limit = match mode {
            GameMode::Speedrun => Some(level_limit.map_or(SPEEDRUN_LEVELS, |limit| limit.min(SPEEDRUN_LEVELS))),
            GameMode::Endless => level_limit,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let dimensions = level_dimensions(mode, settings.difficulty, 0);
        let level = build_level(&mut rng, dimensions, &settings)?;

        info!(%mode, difficulty = %settings.difficulty, seed, ?seed_origin, "run started");
        info!(number = 1, width = dimensions.0, height = dimensions.1, "level built");

        Ok(Self {
            mode,
            settings,
            seed,
            seed_origin,
            rng,
            level_limit,
            level_number: 1,
            dimensions,
            level,
            pursuit: pursuit_for(&settings),
            rules: Rules::new(settings.quiz_budget()),
            level_times: Vec::new(),
            score: 0.0,
            started_at: Utc::now(),
            record: None,
        })
    }

    /// Advances the run by `dt` of logical time.
    ///
    /// While the level is paused only `input.pause` and `input.menu` are
    /// honoured and no time passes. Every event the level emitted is
    /// appended to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Maze`] when pursuit planning or building the
    /// next level fails. The run cannot continue afterwards.
    pub fn tick(
        &mut self,
        dt: Duration,
        input: &FrameInput,
        quiz: &mut dyn Quiz,
        out: &mut Vec<Event>,
    ) -> Result<Progress, SessionError> {
        if self.record.is_some() {
            return Ok(Progress::Finished);
        }

        match query::status(&self.level) {
            LevelStatus::Paused => self.handle_menu(input, out),
            LevelStatus::Playing if input.pause => world::apply(&mut self.level, Command::Pause, out),
            LevelStatus::Playing => self.play(dt, input.direction, quiz, out)?,
            LevelStatus::Won | LevelStatus::Lost => {}
        }

        self.settle()
    }

    fn handle_menu(&mut self, input: &FrameInput, out: &mut Vec<Event>) {
        match input.menu {
            Some(MenuSelection::Resume) => world::apply(&mut self.level, Command::Resume, out),
            Some(MenuSelection::GiveUp) => world::apply(&mut self.level, Command::GiveUp, out),
            Some(MenuSelection::PlayerSpeed(speed)) => {
                self.settings.player_speed = speed;
                world::apply(
                    &mut self.level,
                    Command::SetAnimationLength {
                        length: speed.animation_length(),
                    },
                    out,
                );
            }
            None if input.pause => world::apply(&mut self.level, Command::Resume, out),
            None => {}
        }
    }

    fn play(
        &mut self,
        dt: Duration,
        intent: Option<Direction>,
        quiz: &mut dyn Quiz,
        out: &mut Vec<Event>,
    ) -> Result<(), SessionError> {
        let mut events = Vec::new();
        world::apply(&mut self.level, Command::Tick { dt }, &mut events);

        let mut commands = Vec::new();
        self.pursuit.handle(
            &events,
            &query::pursuer_view(&self.level),
            query::player_cell(&self.level),
            query::grid(&self.level),
            &mut commands,
        )?;
        for command in commands.drain(..) {
            world::apply(&mut self.level, command, &mut events);
        }

        self.rules.handle(&self.level, intent, quiz, &mut commands);
        for command in commands {
            world::apply(&mut self.level, command, &mut events);
        }

        out.extend(events);
        Ok(())
    }

    fn settle(&mut self) -> Result<Progress, SessionError> {
        match query::status(&self.level) {
            LevelStatus::Won => {
                let level_time = query::elapsed(&self.level);
                self.level_times.push(level_time);
                if self.mode == GameMode::Endless {
                    self.score += self.level_score(level_time);
                }

                if self.level_limit.is_some_and(|limit| self.level_number >= limit) {
                    self.finish(RunOutcome::Completed);
                    return Ok(Progress::Finished);
                }

                self.dimensions = level_dimensions(self.mode, self.settings.difficulty, self.level_number);
                self.level = build_level(&mut self.rng, self.dimensions, &self.settings)?;
                self.pursuit = pursuit_for(&self.settings);
                self.level_number += 1;

                let (width, height) = self.dimensions;
                info!(number = self.level_number, width, height, "level built");
                Ok(Progress::LevelStarted {
                    number: self.level_number,
                    width,
                    height,
                })
            }
            LevelStatus::Lost => {
                let reason = query::loss_reason(&self.level)
                    .cloned()
                    .unwrap_or(LossReason::GaveUp);
                self.finish(RunOutcome::Lost {
                    level: self.level_number,
                    reason,
                });
                Ok(Progress::Finished)
            }
            LevelStatus::Playing | LevelStatus::Paused => Ok(Progress::Continuing),
        }
    }

    fn level_score(&self, level_time: Duration) -> f64 {
        let (width, height) = self.dimensions;
        let number = match self.settings.difficulty.number() {
            0 => 5,
            number => number,
        };
        let multiplier = 1.0 + f64::from(5 - number);
        (f64::from(width * height) - level_time.as_secs_f64()) * multiplier
    }

    fn finish(&mut self, outcome: RunOutcome) {
        let score = match self.mode {
            GameMode::Endless => Some(self.score.round() as i64),
            GameMode::Speedrun => None,
        };
        let record = RunRecord::seal(
            HighscoreCategory::new(self.mode, self.settings.difficulty, self.seed_origin),
            self.seed,
            outcome,
            &self.level_times,
            score,
            self.started_at,
            Utc::now(),
        );
        info!(
            mode = %self.mode,
            seed = self.seed,
            levels_won = self.level_times.len(),
            total_time_ms = record.total_time_ms,
            ?score,
            "run finished"
        );
        self.record = Some(record);
    }

    /// Level currently being played.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// One-based number of the current level.
    #[must_use]
    pub const fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Columns and rows of the current maze.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Mode of the run.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Seed the run was started from.
    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// Whether the seed was drawn at random or supplied.
    #[must_use]
    pub const fn seed_origin(&self) -> SeedOrigin {
        self.seed_origin
    }

    /// Settings in effect, including menu changes.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Result of the run once it has finished.
    #[must_use]
    pub const fn record(&self) -> Option<&RunRecord> {
        self.record.as_ref()
    }
}

fn build_level(
    rng: &mut ChaCha8Rng,
    (width, height): (u32, u32),
    settings: &Settings,
) -> Result<Level, MazeError> {
    let blueprint = maze_generation::build(width, height, rng)?;
    let maze = Maze::new(blueprint.grid, blueprint.annotation);
    Ok(Level::new(
        maze,
        settings.difficulty.view_distance(),
        &blueprint.pursuers,
        LevelConfig::new(
            settings.player_speed.animation_length(),
            settings.pursuit.vision,
        ),
    ))
}

fn pursuit_for(settings: &Settings) -> Pursuit {
    Pursuit::new(PursuitConfig::new(
        settings.pursuit.belief_interval(),
        settings.pursuit.move_interval(),
        settings.pursuit.alarm_path_length,
    ))
}
