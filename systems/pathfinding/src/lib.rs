#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first path search over maze tile grids.
//!
//! The search is shared by maze validation, the pursuit system and the route
//! estimator. Neighbours are expanded in up, down, left, right order so that
//! ties between equally short paths resolve the same way on every run.

use std::collections::VecDeque;

use the_maze_core::{MazeError, Position, Tile, TileGrid};

/// Condition that terminates a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    /// Search ends on this exact tile.
    Cell(Position),
    /// Search ends on the first tile of this type.
    Tile(Tile),
}

impl Goal {
    fn is_met(self, grid: &TileGrid, position: Position) -> bool {
        match self {
            Self::Cell(target) => target == position,
            Self::Tile(tile) => grid.is(position, tile),
        }
    }
}

/// Computes the shortest path from `start` to the first tile satisfying `goal`.
///
/// The returned path includes both `start` and the goal tile, so a search
/// whose start already satisfies the goal yields a single position. Tiles equal
/// to `blocking` are never entered.
///
/// # Errors
///
/// Returns [`MazeError::PathNotFound`] when the reachable region holds no
/// goal tile. For a generated maze this signals corrupted state.
pub fn shortest_path(
    grid: &TileGrid,
    start: Position,
    goal: Goal,
    blocking: Tile,
) -> Result<Vec<Position>, MazeError> {
    let not_found = MazeError::PathNotFound { start };
    let width = usize::try_from(grid.columns()).map_err(|_| not_found.clone())?;
    let start_index = index(width, start)
        .filter(|_| grid.contains(start))
        .ok_or_else(|| not_found.clone())?;

    let cell_count = width.saturating_mul(usize::try_from(grid.rows()).unwrap_or(0));
    let mut parents: Vec<Option<Position>> = vec![None; cell_count];
    let mut visited = vec![false; cell_count];
    visited[start_index] = true;

    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if goal.is_met(grid, cell) {
            return Ok(unwind(&parents, width, start, cell));
        }

        for neighbor in grid.neighbors(cell) {
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };
            if visited[neighbor_index] || grid.is(neighbor, blocking) {
                continue;
            }
            visited[neighbor_index] = true;
            parents[neighbor_index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    Err(not_found)
}

fn unwind(parents: &[Option<Position>], width: usize, start: Position, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut cursor = end;
    while cursor != start {
        let Some(parent) = index(width, cursor).and_then(|offset| parents[offset]) else {
            break;
        };
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    path
}

/// Dense breadth-first distance grid flooded from a single origin.
///
/// Distances default to `u32::MAX` for tiles the flood never reached so
/// callers can distinguish blocked regions from traversable ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Floods the grid from `origin`, never entering tiles equal to `blocking`.
    #[must_use]
    pub fn flood(grid: &TileGrid, origin: Position, blocking: Tile) -> Self {
        let width = grid.columns();
        let height = grid.rows();
        let width_usize = usize::try_from(width).unwrap_or(0);
        let cell_count = width_usize.saturating_mul(usize::try_from(height).unwrap_or(0));
        let mut distances = vec![u32::MAX; cell_count];

        let mut queue = VecDeque::new();
        if let Some(origin_index) = index(width_usize, origin).filter(|_| grid.contains(origin)) {
            distances[origin_index] = 0;
            queue.push_back(origin);
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = index(width_usize, cell) else {
                continue;
            };
            let next_distance = distances[current_index].saturating_add(1);

            for neighbor in grid.neighbors(cell) {
                if grid.is(neighbor, blocking) {
                    continue;
                }
                let Some(neighbor_index) = index(width_usize, neighbor) else {
                    continue;
                };
                if distances[neighbor_index] <= next_distance {
                    continue;
                }
                distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        Self {
            width,
            height,
            distances,
        }
    }

    /// Distance in steps from the origin, or `None` if unreachable or out of bounds.
    #[must_use]
    pub fn distance(&self, cell: Position) -> Option<u32> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        index(width, cell)
            .and_then(|offset| self.distances.get(offset).copied())
            .filter(|distance| *distance != u32::MAX)
    }

    /// Number of tiles the flood reached, including the origin.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.distances
            .iter()
            .filter(|distance| **distance != u32::MAX)
            .count()
    }
}

fn index(width: usize, cell: Position) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
