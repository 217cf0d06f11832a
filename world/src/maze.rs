use std::collections::BTreeSet;

use the_maze_core::{Annotation, Position, Tile, TileGrid};

/// Annotated maze owned by a single level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: TileGrid,
    start: Position,
    finish: Position,
    keys: BTreeSet<Position>,
    key_total: u32,
}

impl Maze {
    /// Wraps an annotated grid.
    #[must_use]
    pub fn new(grid: TileGrid, annotation: Annotation) -> Self {
        let key_total = u32::try_from(annotation.keys.len()).unwrap_or(u32::MAX);
        Self {
            grid,
            start: annotation.start,
            finish: annotation.finish,
            keys: annotation.keys,
            key_total,
        }
    }

    /// Reads start, finish and keys back from the tiles of an annotated grid.
    ///
    /// Returns `None` unless the grid holds exactly one start and one finish.
    #[must_use]
    pub fn scan(grid: TileGrid) -> Option<Self> {
        let (start, finish, keys) = {
            let mut starts = grid.iter().filter(|(_, tile)| *tile == Tile::Start);
            let start = starts.next()?.0;
            if starts.next().is_some() {
                return None;
            }
            let mut finishes = grid.iter().filter(|(_, tile)| *tile == Tile::Finish);
            let finish = finishes.next()?.0;
            if finishes.next().is_some() {
                return None;
            }
            let keys: BTreeSet<Position> = grid
                .iter()
                .filter(|(_, tile)| *tile == Tile::Key)
                .map(|(position, _)| position)
                .collect();
            (start, finish, keys)
        };
        Some(Self::new(
            grid,
            Annotation {
                start,
                finish,
                keys,
            },
        ))
    }

    /// Tile layout of the maze.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Tile the player starts on.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Exit door tile.
    #[must_use]
    pub const fn finish(&self) -> Position {
        self.finish
    }

    /// Keys still lying on the grid.
    #[must_use]
    pub const fn keys(&self) -> &BTreeSet<Position> {
        &self.keys
    }

    /// Number of keys placed when the level was built.
    #[must_use]
    pub const fn key_total(&self) -> u32 {
        self.key_total
    }

    /// Turns the key at `cell` back into floor. Returns `false` if there was none.
    pub(crate) fn consume_key(&mut self, cell: Position) -> bool {
        if !self.keys.remove(&cell) {
            return false;
        }
        let _ = self.grid.set(cell, Tile::Path);
        true
    }
}
