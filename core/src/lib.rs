#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across The Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level state, and pure systems. Callers submit [`Command`]
//! values describing desired mutations, the level executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and presentation collaborators to react to deterministically.

use std::{collections::BTreeSet, fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest width or height accepted for a generated maze.
pub const MIN_MAZE_DIMENSION: u32 = 5;

/// Contents of a single maze tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable wall.
    Wall,
    /// Carved floor.
    Path,
    /// Tile the player starts the level on.
    Start,
    /// Exit door the player must reach once enough keys are collected.
    Finish,
    /// Key guarded by a quiz question.
    Key,
    /// Floor already covered by a route estimate.
    Visited,
}

impl Tile {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Reports whether the tile is plain floor carved by the generator.
    #[must_use]
    pub const fn is_carved_floor(self) -> bool {
        matches!(self, Self::Path)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Resolves the direction that moves `from` onto the orthogonally adjacent `to`.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }

    /// Unit offset applied to `(column, row)` when stepping in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single maze tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    column: u32,
    row: u32,
}

impl Position {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Computes the Chebyshev distance between two positions.
    #[must_use]
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }

    /// Position one tile away in `direction`, if it stays inside `columns` x `rows`.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        if column < columns && row < rows {
            Some(Position::new(column, row))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Dense row-major grid of maze tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid where every tile holds `tile`.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, tile: Tile) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![tile; capacity],
        }
    }

    /// Builds a grid from text rows, one character per tile.
    ///
    /// `#` is a wall, `.` floor, `S` start, `F` finish, `K` key and `x` a
    /// visited marker. Any other character is read as floor. Rows shorter than
    /// the first row are padded with walls.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::filled(
            u32::try_from(columns).unwrap_or(0),
            u32::try_from(rows.len()).unwrap_or(0),
            Tile::Wall,
        );
        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, symbol) in row.chars().take(columns).enumerate() {
                let tile = match symbol {
                    '#' => Tile::Wall,
                    'S' => Tile::Start,
                    'F' => Tile::Finish,
                    'K' => Tile::Key,
                    'x' => Tile::Visited,
                    _ => Tile::Path,
                };
                let position = Position::new(column_index as u32, row_index as u32);
                let _ = grid.set(position, tile);
            }
        }
        grid
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.column() < self.columns && position.row() < self.rows
    }

    /// Tile stored at the provided position, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the position holds `tile`. Out-of-bounds positions never match.
    #[must_use]
    pub fn is(&self, position: Position, tile: Tile) -> bool {
        self.get(position) == Some(tile)
    }

    /// Replaces the tile at `position`, returning `false` when it lies outside the grid.
    pub fn set(&mut self, position: Position, tile: Tile) -> bool {
        match self.index(position).and_then(|index| self.tiles.get_mut(index)) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// In-bounds orthogonal neighbours in up, down, left, right order.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> {
        let mut candidates = [None; 4];
        let mut count = 0;

        for direction in [
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ] {
            if let Some(neighbor) = position.step(direction, self.columns, self.rows) {
                candidates[count] = Some(neighbor);
                count += 1;
            }
        }

        candidates.into_iter().take(count).flatten()
    }

    /// Iterates every tile in row-major order alongside its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (Position::new(index % columns, index / columns), *tile)
        })
    }

    /// Number of tiles equal to `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Placement of the special tiles written onto a generated grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// Tile the player starts on.
    pub start: Position,
    /// Exit door tile.
    pub finish: Position,
    /// Key tiles in deterministic order.
    pub keys: BTreeSet<Position>,
}

/// Spawn instruction for a single pursuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PursuerSpawn {
    /// Display name reported when the pursuer raises an alarm or catches the player.
    pub name: String,
    /// Tile the pursuer starts on.
    pub cell: Position,
}

/// How far the player can see around their own tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewDistance {
    /// Tiles further than this many rows or columns away stay hidden.
    Limited(u32),
    /// Whole maze is visible.
    Unlimited,
}

impl ViewDistance {
    /// Reports whether `target` is visible from `origin`.
    #[must_use]
    pub fn covers(self, origin: Position, target: Position) -> bool {
        match self {
            Self::Limited(radius) => origin.chebyshev_distance(target) <= radius,
            Self::Unlimited => true,
        }
    }
}

/// Unique identifier assigned to a pursuer within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PursuerId(u32);

impl PursuerId {
    /// Creates a new pursuer identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Pursuit state of a single pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PursuerMode {
    /// Believed player position lies beyond the vision radius.
    Dormant,
    /// Pursuer is closing in on the believed player position.
    Tracking,
}

/// Outcome of a pursuer's move step as decided by the pursuit system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PursuitStep {
    /// Believed position is out of range; the pursuer goes dormant.
    Hold,
    /// Pursuer already stands on the believed position.
    Stay,
    /// Pursuer advances one tile along its shortest path.
    Advance {
        /// Tile entered by the step.
        to: Position,
    },
}

/// Lifecycle of a single level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    /// Ticks advance and input is accepted.
    Playing,
    /// Simulation is suspended behind the pause menu.
    Paused,
    /// Player reached the open exit.
    Won,
    /// Level ended without reaching the exit.
    Lost,
}

impl LevelStatus {
    /// Reports whether the level reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reason a level was lost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// A pursuer reached the player's tile while able to kill.
    CaughtBy {
        /// Display name of the pursuer.
        name: String,
    },
    /// Too many keys were lost to wrong answers to reach the requirement.
    InsufficientKeys,
    /// Player abandoned the level from the pause menu.
    GaveUp,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaughtBy { name } => write!(f, "caught by {name}"),
            Self::InsufficientKeys => write!(f, "insufficient keys"),
            Self::GaveUp => write!(f, "gave up"),
        }
    }
}

/// Why a player move request was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Destination is a wall or lies outside the maze.
    Blocked,
    /// Previous move animation has not finished yet.
    AnimationInProgress,
    /// Level is paused or already over.
    NotPlaying,
}

/// Commands that express all permissible level mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the level clock by the provided delta time.
    Tick {
        /// Duration of logical time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player start moving one tile in `direction`.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Overwrites every pursuer's believed player position with the true one.
    RefreshPursuerBeliefs,
    /// Applies a planned move step to a pursuer.
    StepPursuer {
        /// Pursuer being moved.
        pursuer: PursuerId,
        /// Planned step.
        step: PursuitStep,
        /// Whether the pursuer is close enough along its path to raise an alarm.
        alarm: bool,
    },
    /// Consumes the key under the player after the quiz gate answered.
    ResolveKey {
        /// Whether the quiz was answered correctly.
        correct: bool,
    },
    /// Ends the level as won.
    DeclareWin,
    /// Ends the level as lost.
    DeclareLoss {
        /// Why the level was lost.
        reason: LossReason,
    },
    /// Suspends the level behind the pause menu.
    Pause,
    /// Leaves the pause menu and continues playing.
    Resume,
    /// Abandons the level.
    GiveUp,
    /// Changes how long a one-tile move animation lasts for every actor.
    SetAnimationLength {
        /// New animation length.
        length: Duration,
    },
}

/// Events broadcast by the level after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the level clock advanced.
    TimeAdvanced {
        /// Duration of logical time that elapsed in the tick.
        dt: Duration,
    },
    /// Player started animating toward a neighbouring tile.
    PlayerMoveStarted {
        /// Tile the player is leaving.
        from: Position,
        /// Tile the player is heading to.
        to: Position,
    },
    /// Player move animation finished and the position was committed.
    PlayerArrived {
        /// Tile the player left.
        from: Position,
        /// Tile the player now occupies.
        to: Position,
    },
    /// Player move request was turned down.
    PlayerMoveRejected {
        /// Requested direction.
        direction: Direction,
        /// Why the request was rejected.
        reason: MoveRejection,
    },
    /// Pursuers learned where the player currently is.
    PursuerBeliefsRefreshed {
        /// Position every pursuer now believes the player occupies.
        believed: Position,
    },
    /// Pursuer switched between dormant and tracking.
    PursuerModeChanged {
        /// Pursuer whose mode changed.
        pursuer: PursuerId,
        /// Newly active mode.
        mode: PursuerMode,
    },
    /// Pursuer stepped onto a neighbouring tile.
    PursuerAdvanced {
        /// Pursuer that moved.
        pursuer: PursuerId,
        /// Tile the pursuer left.
        from: Position,
        /// Tile the pursuer now occupies.
        to: Position,
    },
    /// Pursuer finished its move animation and can catch the player again.
    PursuerSettled {
        /// Pursuer whose animation completed.
        pursuer: PursuerId,
    },
    /// Pursuer is close to the player along its path.
    Alarm {
        /// Pursuer raising the alarm.
        pursuer: PursuerId,
        /// Display name of the pursuer.
        name: String,
    },
    /// Key tile under the player was consumed.
    KeyCollected {
        /// Tile the key occupied.
        cell: Position,
        /// Whether the quiz answer was correct and the key counted.
        correct: bool,
    },
    /// Key progress after a key was consumed.
    KeysProgress {
        /// Keys counted toward the requirement.
        collected: u32,
        /// Keys required to open the exit.
        required: u32,
    },
    /// Enough keys were collected; the exit door is open.
    FinishOpened,
    /// Level was paused.
    Paused,
    /// Level resumed from the pause menu.
    Resumed,
    /// Player won the level.
    LevelWon,
    /// Player lost the level.
    LevelLost {
        /// Why the level was lost.
        reason: LossReason,
    },
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PursuerSnapshot {
    /// Identifier assigned to the pursuer.
    pub id: PursuerId,
    /// Display name of the pursuer.
    pub name: String,
    /// Tile currently occupied.
    pub cell: Position,
    /// Tile occupied before the last step, used for interpolation.
    pub previous: Position,
    /// Where the pursuer believes the player is.
    pub believed: Position,
    /// Largest row or column distance at which the pursuer acts on its belief.
    pub vision: u32,
    /// Current pursuit mode.
    pub mode: PursuerMode,
    /// Fractional progress of the running move animation.
    pub progress: f32,
    /// Whether standing on the player's tile counts as a catch.
    pub kill_enabled: bool,
}

/// Read-only snapshot describing all pursuers within a level.
#[derive(Clone, Debug, Default)]
pub struct PursuerView {
    snapshots: Vec<PursuerSnapshot>,
}

impl PursuerView {
    /// Creates a new pursuer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PursuerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured pursuer snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PursuerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pursuers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no pursuers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PursuerSnapshot> {
        self.snapshots
    }
}

/// Quiz collaborator consulted when the player steps onto a key.
pub trait Quiz {
    /// Asks one question, returning whether it was answered correctly.
    ///
    /// Implementations must give up once `budget` elapses and report
    /// [`QuizTimeout`]; they must not touch level state.
    fn ask(&mut self, budget: Duration) -> Result<bool, QuizTimeout>;
}

/// Structural failures that abort the current level or run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Requested maze is smaller than the supported minimum.
    #[error("maze dimensions {width}x{height} are below the {MIN_MAZE_DIMENSION}x{MIN_MAZE_DIMENSION} minimum")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Breadth-first search exhausted the maze without reaching its goal.
    #[error("no path from {start} reaches the requested goal")]
    PathNotFound {
        /// Tile the search started from.
        start: Position,
    },
    /// The region a special tile is anchored to contains no floor.
    #[error("no floor tile for the {anchor} at or right of column {column}")]
    NoOpenTile {
        /// First column of the searched region.
        column: u32,
        /// Special tile being placed.
        anchor: &'static str,
    },
    /// Key placement rejected every candidate tile.
    #[error("could not place key {placed} of {requested} without adjacent keys")]
    KeyPlacementExhausted {
        /// Keys placed before giving up.
        placed: u32,
        /// Keys requested.
        requested: u32,
    },
}

/// Returned by a quiz collaborator when the time budget ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("quiz question was not answered within {budget:?}")]
pub struct QuizTimeout {
    /// Budget that expired.
    pub budget: Duration,
}

/// Returned when a move animation is requested while one is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("a move animation toward {heading:?} is still in progress")]
pub struct AnimationInProgress {
    /// Direction of the running animation.
    pub heading: Direction,
}
