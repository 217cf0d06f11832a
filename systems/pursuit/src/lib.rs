#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Delayed-information pursuit system.
//!
//! Two independent countdowns run off the level clock. The slow one refreshes
//! every pursuer's belief about where the player is; the fast one moves each
//! pursuer one tile toward that belief. Between refreshes the belief is
//! stale, which is what lets the player escape.

use std::time::Duration;

use the_maze_core::{
    Command, Event, MazeError, Position, PursuerSnapshot, PursuerView, PursuitStep, Tile,
    TileGrid,
};
use the_maze_system_pathfinding::{shortest_path, Goal};
use tracing::trace;

/// Configuration parameters required to construct the pursuit system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    belief_interval: Duration,
    move_interval: Duration,
    alarm_path_length: usize,
}

impl Config {
    /// Creates a new configuration from the two cadences and the alarm threshold.
    ///
    /// An alarm is raised whenever a pursuer's path to its believed target
    /// holds at most `alarm_path_length` tiles, both ends included.
    #[must_use]
    pub const fn new(
        belief_interval: Duration,
        move_interval: Duration,
        alarm_path_length: usize,
    ) -> Self {
        Self {
            belief_interval,
            move_interval,
            alarm_path_length,
        }
    }
}

/// Countdown that fires once every `interval` of accumulated logical time.
///
/// Overshoot carries into the next period so the schedule never drifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    interval: Duration,
    accumulator: Duration,
}

impl Cadence {
    /// Creates a cadence that first fires after one full interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Advances the countdown, returning how many periods elapsed.
    ///
    /// A zero interval never fires.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Time left until the next firing.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }
}

/// Pure system that turns elapsed time into pursuer commands.
#[derive(Debug)]
pub struct Pursuit {
    belief: Cadence,
    movement: Cadence,
    alarm_path_length: usize,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            belief: Cadence::new(config.belief_interval),
            movement: Cadence::new(config.move_interval),
            alarm_path_length: config.alarm_path_length,
        }
    }

    /// Consumes events and immutable views to emit pursuer commands.
    ///
    /// Each cadence fires at most once per call even when a long tick spans
    /// several periods. A belief refresh is emitted before, and planned into,
    /// the move steps of the same call.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::PathNotFound`] if a pursuer cannot reach its
    /// believed target, which means the grid is corrupted.
    pub fn handle(
        &mut self,
        events: &[Event],
        pursuers: &PursuerView,
        player: Position,
        grid: &TileGrid,
        out: &mut Vec<Command>,
    ) -> Result<(), MazeError> {
        let mut elapsed = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = elapsed.saturating_add(*dt);
            }
        }

        if elapsed.is_zero() || pursuers.is_empty() {
            return Ok(());
        }

        let refresh = self.belief.advance(elapsed) > 0;
        let step = self.movement.advance(elapsed) > 0;

        if refresh {
            out.push(Command::RefreshPursuerBeliefs);
        }

        if step {
            for snapshot in pursuers.iter() {
                let believed = if refresh { player } else { snapshot.believed };
                let (step, alarm) = plan_step(snapshot, believed, grid, self.alarm_path_length)?;
                out.push(Command::StepPursuer {
                    pursuer: snapshot.id,
                    step,
                    alarm,
                });
            }
        }

        Ok(())
    }
}

/// Decides a single pursuer's move toward `believed`.
///
/// Returns the step together with whether an alarm should sound.
///
/// # Errors
///
/// Propagates [`MazeError::PathNotFound`] from the path search.
pub fn plan_step(
    pursuer: &PursuerSnapshot,
    believed: Position,
    grid: &TileGrid,
    alarm_path_length: usize,
) -> Result<(PursuitStep, bool), MazeError> {
    if pursuer.cell.chebyshev_distance(believed) > pursuer.vision {
        trace!(pursuer = pursuer.id.get(), %believed, "belief out of range");
        return Ok((PursuitStep::Hold, false));
    }

    let path = shortest_path(grid, pursuer.cell, Goal::Cell(believed), Tile::Wall)?;
    let step = match path.get(1) {
        Some(next) => PursuitStep::Advance { to: *next },
        None => PursuitStep::Stay,
    };
    Ok((step, path.len() <= alarm_path_length))
}
