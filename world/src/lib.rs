#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for The Maze.
//!
//! A [`Level`] owns one maze, the player, and the pursuers for the lifetime of
//! a single level. It is mutated exclusively through [`apply`] and read through
//! the [`query`] module.

mod animation;
mod maze;

use std::time::Duration;

use the_maze_core::{
    Command, Direction, Event, LevelStatus, LossReason, MoveRejection, Position, PursuerId,
    PursuerMode, PursuerSpawn, PursuitStep, ViewDistance,
};
use tracing::{debug, info};

pub use animation::MovementAnimator;
pub use maze::Maze;

const DEFAULT_ANIMATION_LENGTH: Duration = Duration::from_millis(150);
const DEFAULT_PURSUER_VISION: u32 = 20;

/// Per-level tuning supplied by the enclosing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    animation_length: Duration,
    pursuer_vision: u32,
}

impl LevelConfig {
    /// Creates a level configuration.
    #[must_use]
    pub const fn new(animation_length: Duration, pursuer_vision: u32) -> Self {
        Self {
            animation_length,
            pursuer_vision,
        }
    }

    /// Length of a one-tile move animation for every actor.
    #[must_use]
    pub const fn animation_length(&self) -> Duration {
        self.animation_length
    }

    /// Vision radius assigned to every pursuer.
    #[must_use]
    pub const fn pursuer_vision(&self) -> u32 {
        self.pursuer_vision
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_LENGTH, DEFAULT_PURSUER_VISION)
    }
}

#[derive(Clone, Debug)]
struct Player {
    cell: Position,
    destination: Option<Position>,
    view: ViewDistance,
    animator: MovementAnimator,
}

#[derive(Clone, Debug)]
struct Pursuer {
    id: PursuerId,
    name: String,
    cell: Position,
    previous: Position,
    believed: Position,
    vision: u32,
    mode: PursuerMode,
    animator: MovementAnimator,
}

impl Pursuer {
    fn kill_enabled(&self) -> bool {
        !self.animator.is_active()
    }

    fn set_mode(&mut self, mode: PursuerMode, out_events: &mut Vec<Event>) {
        if self.mode != mode {
            self.mode = mode;
            out_events.push(Event::PursuerModeChanged {
                pursuer: self.id,
                mode,
            });
        }
    }
}

/// Represents the authoritative state of one level.
#[derive(Clone, Debug)]
pub struct Level {
    maze: Maze,
    player: Player,
    pursuers: Vec<Pursuer>,
    keys_collected: u32,
    keys_required: u32,
    door_open: bool,
    status: LevelStatus,
    loss_reason: Option<LossReason>,
    elapsed: Duration,
}

impl Level {
    /// Creates a level with the player on the maze's start tile.
    ///
    /// Pursuers spawn dormant, believing the player stands on the start tile.
    #[must_use]
    pub fn new(
        maze: Maze,
        view: ViewDistance,
        spawns: &[PursuerSpawn],
        config: LevelConfig,
    ) -> Self {
        let start = maze.start();
        let pursuers = spawns
            .iter()
            .enumerate()
            .map(|(index, spawn)| Pursuer {
                id: PursuerId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                name: spawn.name.clone(),
                cell: spawn.cell,
                previous: spawn.cell,
                believed: start,
                vision: config.pursuer_vision(),
                mode: PursuerMode::Dormant,
                animator: MovementAnimator::new(config.animation_length()),
            })
            .collect();
        let keys_required = maze.key_total() / 2;

        Self {
            player: Player {
                cell: start,
                destination: None,
                view,
                animator: MovementAnimator::new(config.animation_length()),
            },
            pursuers,
            keys_collected: 0,
            keys_required,
            door_open: keys_required == 0,
            status: LevelStatus::Playing,
            loss_reason: None,
            elapsed: Duration::ZERO,
            maze,
        }
    }

    fn pursuer_mut(&mut self, pursuer: PursuerId) -> Option<&mut Pursuer> {
        self.pursuers.iter_mut().find(|candidate| candidate.id == pursuer)
    }

    fn finish(&mut self, status: LevelStatus, out_events: &mut Vec<Event>) {
        self.status = status;
        match status {
            LevelStatus::Won => {
                info!(elapsed_ms = self.elapsed.as_millis() as u64, "level won");
                out_events.push(Event::LevelWon);
            }
            LevelStatus::Lost => {
                let reason = self.loss_reason.clone().unwrap_or(LossReason::GaveUp);
                info!(reason = %reason, elapsed_ms = self.elapsed.as_millis() as u64, "level lost");
                out_events.push(Event::LevelLost { reason });
            }
            LevelStatus::Playing | LevelStatus::Paused => {}
        }
    }

    fn advance_animations(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.player.animator.advance(dt).is_some() {
            let from = self.player.cell;
            if let Some(to) = self.player.destination.take() {
                self.player.cell = to;
                out_events.push(Event::PlayerArrived { from, to });
            }
        }

        for pursuer in &mut self.pursuers {
            if pursuer.animator.advance(dt).is_some() {
                pursuer.previous = pursuer.cell;
                out_events.push(Event::PursuerSettled {
                    pursuer: pursuer.id,
                });
            }
        }
    }

    fn start_player_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.status != LevelStatus::Playing {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::NotPlaying,
            });
            return;
        }

        let grid = self.maze.grid();
        let from = self.player.cell;
        let Some(to) = from
            .step(direction, grid.columns(), grid.rows())
            .filter(|cell| grid.get(*cell).is_some_and(|tile| !tile.is_wall()))
        else {
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::Blocked,
            });
            return;
        };

        if let Err(error) = self.player.animator.start(direction) {
            debug!(%error, "player move rejected");
            out_events.push(Event::PlayerMoveRejected {
                direction,
                reason: MoveRejection::AnimationInProgress,
            });
            return;
        }

        self.player.destination = Some(to);
        out_events.push(Event::PlayerMoveStarted { from, to });
    }

    fn step_pursuer(
        &mut self,
        pursuer: PursuerId,
        step: PursuitStep,
        alarm: bool,
        out_events: &mut Vec<Event>,
    ) {
        let Some(actor) = self.pursuer_mut(pursuer) else {
            return;
        };

        match step {
            PursuitStep::Hold => {
                if !actor.animator.is_active() {
                    actor.previous = actor.cell;
                }
                actor.set_mode(PursuerMode::Dormant, out_events);
                return;
            }
            PursuitStep::Stay => {
                if !actor.animator.is_active() {
                    actor.previous = actor.cell;
                }
                actor.set_mode(PursuerMode::Tracking, out_events);
            }
            PursuitStep::Advance { to } => {
                actor.set_mode(PursuerMode::Tracking, out_events);
                let from = actor.cell;
                let Some(direction) = Direction::between(from, to) else {
                    debug!(pursuer = pursuer.get(), %from, %to, "pursuer step is not adjacent");
                    return;
                };
                if let Err(error) = actor.animator.start(direction) {
                    debug!(pursuer = pursuer.get(), %error, "pursuer step skipped");
                    return;
                }
                actor.previous = from;
                actor.cell = to;
                out_events.push(Event::PursuerAdvanced { pursuer, from, to });
            }
        }

        if alarm {
            debug!(pursuer = pursuer.get(), name = %actor.name, "alarm");
            out_events.push(Event::Alarm {
                pursuer,
                name: actor.name.clone(),
            });
        }
    }

    fn resolve_key(&mut self, correct: bool, out_events: &mut Vec<Event>) {
        let cell = self.player.cell;
        if !self.maze.consume_key(cell) {
            return;
        }
        if correct {
            self.keys_collected = self.keys_collected.saturating_add(1);
        }
        info!(
            %cell,
            correct,
            collected = self.keys_collected,
            required = self.keys_required,
            "key resolved"
        );
        out_events.push(Event::KeyCollected { cell, correct });
        out_events.push(Event::KeysProgress {
            collected: self.keys_collected,
            required: self.keys_required,
        });
        if !self.door_open && self.keys_collected >= self.keys_required {
            self.door_open = true;
            out_events.push(Event::FinishOpened);
        }
    }
}

/// Applies the provided command to the level, mutating state deterministically.
pub fn apply(level: &mut Level, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if level.status != LevelStatus::Playing {
                return;
            }
            level.elapsed = level.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            level.advance_animations(dt, out_events);
        }
        Command::MovePlayer { direction } => level.start_player_move(direction, out_events),
        Command::RefreshPursuerBeliefs => {
            if level.status != LevelStatus::Playing || level.pursuers.is_empty() {
                return;
            }
            let believed = level.player.cell;
            for pursuer in &mut level.pursuers {
                pursuer.believed = believed;
            }
            debug!(%believed, "pursuer beliefs refreshed");
            out_events.push(Event::PursuerBeliefsRefreshed { believed });
        }
        Command::StepPursuer {
            pursuer,
            step,
            alarm,
        } => {
            if level.status == LevelStatus::Playing {
                level.step_pursuer(pursuer, step, alarm, out_events);
            }
        }
        Command::ResolveKey { correct } => {
            if level.status == LevelStatus::Playing {
                level.resolve_key(correct, out_events);
            }
        }
        Command::DeclareWin => {
            if level.status == LevelStatus::Playing {
                level.finish(LevelStatus::Won, out_events);
            }
        }
        Command::DeclareLoss { reason } => {
            if level.status == LevelStatus::Playing {
                level.loss_reason = Some(reason);
                level.finish(LevelStatus::Lost, out_events);
            }
        }
        Command::Pause => {
            if level.status == LevelStatus::Playing {
                level.status = LevelStatus::Paused;
                info!("level paused");
                out_events.push(Event::Paused);
            }
        }
        Command::Resume => {
            if level.status == LevelStatus::Paused {
                level.status = LevelStatus::Playing;
                info!("level resumed");
                out_events.push(Event::Resumed);
            }
        }
        Command::GiveUp => {
            if !level.status.is_terminal() {
                level.loss_reason = Some(LossReason::GaveUp);
                level.finish(LevelStatus::Lost, out_events);
            }
        }
        Command::SetAnimationLength { length } => {
            level.player.animator.set_length(length);
            for pursuer in &mut level.pursuers {
                pursuer.animator.set_length(length);
            }
            debug!(length_ms = length.as_millis() as u64, "animation length changed");
        }
    }
}

/// Query functions that provide read-only access to the level state.
pub mod query {
    use std::time::Duration;

    use super::{Level, Maze};
    use the_maze_core::{
        Direction, LevelStatus, LossReason, Position, PursuerSnapshot, PursuerView, Tile,
        TileGrid, ViewDistance,
    };

    /// Provides read-only access to the level's maze.
    #[must_use]
    pub fn maze(level: &Level) -> &Maze {
        &level.maze
    }

    /// Provides read-only access to the current tile layout.
    #[must_use]
    pub fn grid(level: &Level) -> &TileGrid {
        level.maze.grid()
    }

    /// Tile the player occupies. Only committed once a move animation completes.
    #[must_use]
    pub fn player_cell(level: &Level) -> Position {
        level.player.cell
    }

    /// How far the player can see.
    #[must_use]
    pub fn player_view(level: &Level) -> ViewDistance {
        level.player.view
    }

    /// Heading of the player's move in flight.
    #[must_use]
    pub fn player_heading(level: &Level) -> Option<Direction> {
        level.player.animator.heading()
    }

    /// Fractional progress of the player's move animation.
    #[must_use]
    pub fn player_progress(level: &Level) -> f32 {
        level.player.animator.progress()
    }

    /// Reports whether the player's movement lock is held.
    #[must_use]
    pub fn movement_locked(level: &Level) -> bool {
        level.player.animator.is_active()
    }

    /// Length of a one-tile move animation currently in effect.
    #[must_use]
    pub fn animation_length(level: &Level) -> Duration {
        level.player.animator.length()
    }

    /// Reports whether `target` is visible from the player's tile.
    #[must_use]
    pub fn is_visible(level: &Level, target: Position) -> bool {
        level.player.view.covers(level.player.cell, target)
    }

    /// Captures a read-only view of the pursuers inhabiting the level.
    #[must_use]
    pub fn pursuer_view(level: &Level) -> PursuerView {
        let snapshots = level
            .pursuers
            .iter()
            .map(|pursuer| PursuerSnapshot {
                id: pursuer.id,
                name: pursuer.name.clone(),
                cell: pursuer.cell,
                previous: pursuer.previous,
                believed: pursuer.believed,
                vision: pursuer.vision,
                mode: pursuer.mode,
                progress: pursuer.animator.progress(),
                kill_enabled: pursuer.kill_enabled(),
            })
            .collect();
        PursuerView::from_snapshots(snapshots)
    }

    /// Name of the first pursuer standing on the player's tile while able to kill.
    #[must_use]
    pub fn catching_pursuer(level: &Level) -> Option<&str> {
        level
            .pursuers
            .iter()
            .find(|pursuer| pursuer.cell == level.player.cell && pursuer.kill_enabled())
            .map(|pursuer| pursuer.name.as_str())
    }

    /// Reports whether the player stands on a key tile.
    #[must_use]
    pub fn player_on_key(level: &Level) -> bool {
        level.maze.grid().is(level.player.cell, Tile::Key)
    }

    /// Reports whether the player stands on the exit door.
    #[must_use]
    pub fn player_at_finish(level: &Level) -> bool {
        level.player.cell == level.maze.finish()
    }

    /// Keys counted toward the requirement.
    #[must_use]
    pub fn keys_collected(level: &Level) -> u32 {
        level.keys_collected
    }

    /// Keys required to open the exit.
    #[must_use]
    pub fn keys_required(level: &Level) -> u32 {
        level.keys_required
    }

    /// Keys still lying on the grid.
    #[must_use]
    pub fn remaining_keys(level: &Level) -> u32 {
        u32::try_from(level.maze.keys().len()).unwrap_or(u32::MAX)
    }

    /// Reports whether enough keys were collected to open the exit.
    #[must_use]
    pub fn door_open(level: &Level) -> bool {
        level.door_open
    }

    /// Lifecycle state of the level.
    #[must_use]
    pub fn status(level: &Level) -> LevelStatus {
        level.status
    }

    /// Why the level was lost, once it has been.
    #[must_use]
    pub fn loss_reason(level: &Level) -> Option<&LossReason> {
        level.loss_reason.as_ref()
    }

    /// Logical time spent playing the level. Paused time is not counted.
    #[must_use]
    pub fn elapsed(level: &Level) -> Duration {
        level.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use the_maze_core::{PursuerSpawn, TileGrid};

    fn corridor_level(spawns: &[PursuerSpawn]) -> Level {
        let grid = TileGrid::from_rows(&[
            "#######",
            "#S.K.F#",
            "#.###.#",
            "#..K..#",
            "#######",
        ]);
        let maze = Maze::scan(grid).expect("annotated grid");
        Level::new(
            maze,
            ViewDistance::Limited(4),
            spawns,
            LevelConfig::new(Duration::from_millis(100), 20),
        )
    }

    fn tick(level: &mut Level, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            level,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    fn move_player(level: &mut Level, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(level, Command::MovePlayer { direction }, &mut events);
        events
    }

    #[test]
    fn new_level_counts_required_keys() {
        let level = corridor_level(&[]);
        assert_eq!(query::player_cell(&level), Position::new(1, 1));
        assert_eq!(query::keys_required(&level), 1);
        assert_eq!(query::remaining_keys(&level), 2);
        assert_eq!(query::status(&level), LevelStatus::Playing);
        assert!(!query::door_open(&level));
    }

    #[test]
    fn player_position_commits_when_animation_completes() {
        let mut level = corridor_level(&[]);
        let events = move_player(&mut level, Direction::East);
        assert_eq!(
            events,
            vec![Event::PlayerMoveStarted {
                from: Position::new(1, 1),
                to: Position::new(2, 1),
            }]
        );
        assert!(query::movement_locked(&level));

        let _ = tick(&mut level, 60);
        assert_eq!(query::player_cell(&level), Position::new(1, 1));

        let events = tick(&mut level, 60);
        assert!(events.contains(&Event::PlayerArrived {
            from: Position::new(1, 1),
            to: Position::new(2, 1),
        }));
        assert_eq!(query::player_cell(&level), Position::new(2, 1));
        assert!(!query::movement_locked(&level));
    }

    #[test]
    fn move_while_locked_is_rejected_without_moving() {
        let mut level = corridor_level(&[]);
        let _ = move_player(&mut level, Direction::East);
        let _ = tick(&mut level, 40);

        let events = move_player(&mut level, Direction::South);
        assert_eq!(
            events,
            vec![Event::PlayerMoveRejected {
                direction: Direction::South,
                reason: MoveRejection::AnimationInProgress,
            }]
        );
        assert_eq!(query::player_heading(&level), Some(Direction::East));
        assert_eq!(query::player_cell(&level), Position::new(1, 1));
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let mut level = corridor_level(&[]);
        let events = move_player(&mut level, Direction::North);
        assert_eq!(
            events,
            vec![Event::PlayerMoveRejected {
                direction: Direction::North,
                reason: MoveRejection::Blocked,
            }]
        );
        assert!(!query::movement_locked(&level));
    }

    #[test]
    fn wrong_answer_consumes_key_without_credit() {
        let mut level = corridor_level(&[]);
        let _ = move_player(&mut level, Direction::East);
        let _ = tick(&mut level, 100);
        let _ = move_player(&mut level, Direction::East);
        let _ = tick(&mut level, 100);
        assert!(query::player_on_key(&level));

        let mut events = Vec::new();
        apply(&mut level, Command::ResolveKey { correct: false }, &mut events);
        assert_eq!(
            events,
            vec![
                Event::KeyCollected {
                    cell: Position::new(3, 1),
                    correct: false,
                },
                Event::KeysProgress {
                    collected: 0,
                    required: 1,
                },
            ]
        );
        assert!(!query::player_on_key(&level));
        assert_eq!(query::remaining_keys(&level), 1);
        assert_eq!(query::keys_collected(&level), 0);
    }

    #[test]
    fn correct_answer_opens_finish() {
        let mut level = corridor_level(&[]);
        let _ = move_player(&mut level, Direction::East);
        let _ = tick(&mut level, 100);
        let _ = move_player(&mut level, Direction::East);
        let _ = tick(&mut level, 100);

        let mut events = Vec::new();
        apply(&mut level, Command::ResolveKey { correct: true }, &mut events);
        assert_eq!(events.last(), Some(&Event::FinishOpened));
        assert!(query::door_open(&level));
        assert_eq!(query::keys_collected(&level), 1);
    }

    #[test]
    fn pause_suspends_ticks_and_moves() {
        let mut level = corridor_level(&[]);
        let mut events = Vec::new();
        apply(&mut level, Command::Pause, &mut events);
        assert_eq!(events, vec![Event::Paused]);

        assert!(tick(&mut level, 500).is_empty());
        assert_eq!(query::elapsed(&level), Duration::ZERO);
        let events = move_player(&mut level, Direction::East);
        assert_eq!(
            events,
            vec![Event::PlayerMoveRejected {
                direction: Direction::East,
                reason: MoveRejection::NotPlaying,
            }]
        );

        let mut events = Vec::new();
        apply(&mut level, Command::GiveUp, &mut events);
        assert_eq!(
            events,
            vec![Event::LevelLost {
                reason: LossReason::GaveUp,
            }]
        );
        assert_eq!(query::status(&level), LevelStatus::Lost);
    }

    #[test]
    fn advancing_pursuer_cannot_kill_until_settled() {
        let spawn = PursuerSpawn {
            name: "Petr".to_owned(),
            cell: Position::new(3, 1),
        };
        let mut level = corridor_level(&[spawn]);
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::StepPursuer {
                pursuer: PursuerId::new(0),
                step: PursuitStep::Advance {
                    to: Position::new(2, 1),
                },
                alarm: true,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![
                Event::PursuerModeChanged {
                    pursuer: PursuerId::new(0),
                    mode: PursuerMode::Tracking,
                },
                Event::PursuerAdvanced {
                    pursuer: PursuerId::new(0),
                    from: Position::new(3, 1),
                    to: Position::new(2, 1),
                },
                Event::Alarm {
                    pursuer: PursuerId::new(0),
                    name: "Petr".to_owned(),
                },
            ]
        );

        let _ = move_player(&mut level, Direction::East);
        let events = tick(&mut level, 100);
        assert!(events.contains(&Event::PursuerSettled {
            pursuer: PursuerId::new(0),
        }));
        assert_eq!(query::player_cell(&level), Position::new(2, 1));
        assert_eq!(query::catching_pursuer(&level), Some("Petr"));
    }

    #[test]
    fn mid_animation_pursuer_does_not_catch() {
        let spawn = PursuerSpawn {
            name: "Base".to_owned(),
            cell: Position::new(2, 1),
        };
        let mut level = corridor_level(&[spawn]);
        let mut events = Vec::new();
        apply(
            &mut level,
            Command::StepPursuer {
                pursuer: PursuerId::new(0),
                step: PursuitStep::Advance {
                    to: Position::new(1, 1),
                },
                alarm: false,
            },
            &mut events,
        );
        assert_eq!(query::catching_pursuer(&level), None);
        let snapshot = query::pursuer_view(&level).into_vec().remove(0);
        assert!(!snapshot.kill_enabled);
        assert_eq!(snapshot.previous, Position::new(2, 1));

        let _ = tick(&mut level, 100);
        assert_eq!(query::catching_pursuer(&level), Some("Base"));
    }

    #[test]
    fn holding_mid_step_keeps_the_origin_cell() {
        let spawn = PursuerSpawn {
            name: "Base".to_owned(),
            cell: Position::new(3, 1),
        };
        let mut level = corridor_level(&[spawn]);
        let step = |level: &mut Level, step: PursuitStep| {
            let mut events = Vec::new();
            apply(
                level,
                Command::StepPursuer {
                    pursuer: PursuerId::new(0),
                    step,
                    alarm: false,
                },
                &mut events,
            );
        };

        step(&mut level, PursuitStep::Advance { to: Position::new(2, 1) });
        let _ = tick(&mut level, 50);
        step(&mut level, PursuitStep::Stay);
        step(&mut level, PursuitStep::Hold);
        let snapshot = query::pursuer_view(&level).into_vec().remove(0);
        assert_eq!(snapshot.cell, Position::new(2, 1));
        assert_eq!(snapshot.previous, Position::new(3, 1));
        assert!(!snapshot.kill_enabled);

        let _ = tick(&mut level, 100);
        step(&mut level, PursuitStep::Stay);
        let snapshot = query::pursuer_view(&level).into_vec().remove(0);
        assert_eq!(snapshot.previous, Position::new(2, 1));
    }

    #[test]
    fn belief_refresh_copies_true_player_cell() {
        let spawn = PursuerSpawn {
            name: "Alfons".to_owned(),
            cell: Position::new(5, 3),
        };
        let mut level = corridor_level(&[spawn]);
        let _ = move_player(&mut level, Direction::South);
        let _ = tick(&mut level, 100);

        let mut events = Vec::new();
        apply(&mut level, Command::RefreshPursuerBeliefs, &mut events);
        assert_eq!(
            events,
            vec![Event::PursuerBeliefsRefreshed {
                believed: Position::new(1, 2),
            }]
        );
        let snapshot = query::pursuer_view(&level).into_vec().remove(0);
        assert_eq!(snapshot.believed, Position::new(1, 2));
    }

    #[test]
    fn visibility_uses_player_view_distance() {
        let level = corridor_level(&[]);
        assert!(query::is_visible(&level, Position::new(5, 3)));
        assert!(!query::is_visible(&level, Position::new(6, 1)));
    }
}
