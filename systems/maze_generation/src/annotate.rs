use std::collections::BTreeSet;

use rand::Rng;
use the_maze_core::{Annotation, MazeError, Position, Tile, TileGrid, MIN_MAZE_DIMENSION};
use the_maze_system_pathfinding::{shortest_path, Goal};

/// Number of keys placed on a maze of the given size.
#[must_use]
pub fn key_count(width: u32, height: u32) -> u32 {
    let count = (u64::from(width) * u64::from(height) / 100 + 1).max(2);
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Places the start, finish and key tiles onto a generated grid.
///
/// The start sits in column 1 and the finish in column `width - 2`, each on a
/// uniformly drawn row that is resampled while it lands on a wall. Keys are
/// drawn uniformly over the interior and resampled unless the tile is plain
/// floor with no key among its four neighbours.
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] for grids below the minimum size,
/// [`MazeError::NoOpenTile`] when an anchor column holds no floor and
/// [`MazeError::KeyPlacementExhausted`] when no tile can take another key.
/// The last two are checked before sampling, so no grid loops forever.
pub fn annotate<R>(grid: &mut TileGrid, rng: &mut R) -> Result<Annotation, MazeError>
where
    R: Rng + ?Sized,
{
    let (width, height) = (grid.columns(), grid.rows());
    if width < MIN_MAZE_DIMENSION || height < MIN_MAZE_DIMENSION {
        return Err(MazeError::InvalidDimensions { width, height });
    }

    let start = place_anchor(grid, 1, Tile::Start, "start", rng)?;
    let finish = place_anchor(grid, grid.columns() - 2, Tile::Finish, "finish", rng)?;

    let requested = key_count(grid.columns(), grid.rows());
    let mut keys = BTreeSet::new();
    for placed in 0..requested {
        let has_candidate = grid
            .iter()
            .any(|(position, _)| accepts_key(grid, &keys, position));
        if !has_candidate {
            return Err(MazeError::KeyPlacementExhausted { placed, requested });
        }

        let key = loop {
            let column = rng.gen_range(1..=grid.columns() - 2);
            let row = rng.gen_range(1..=grid.rows() - 2);
            let candidate = Position::new(column, row);
            if accepts_key(grid, &keys, candidate) {
                break candidate;
            }
        };
        let _ = grid.set(key, Tile::Key);
        let _ = keys.insert(key);
    }

    Ok(Annotation {
        start,
        finish,
        keys,
    })
}

fn place_anchor<R>(
    grid: &mut TileGrid,
    column: u32,
    tile: Tile,
    anchor: &'static str,
    rng: &mut R,
) -> Result<Position, MazeError>
where
    R: Rng + ?Sized,
{
    let last_row = grid.rows() - 2;
    let open = (1..=last_row).any(|row| !grid.is(Position::new(column, row), Tile::Wall));
    if !open {
        return Err(MazeError::NoOpenTile { column, anchor });
    }

    let position = loop {
        let candidate = Position::new(column, rng.gen_range(1..=last_row));
        if !grid.is(candidate, Tile::Wall) {
            break candidate;
        }
    };
    let _ = grid.set(position, tile);
    Ok(position)
}

fn accepts_key(grid: &TileGrid, keys: &BTreeSet<Position>, candidate: Position) -> bool {
    let interior = candidate.column() >= 1
        && candidate.column() <= grid.columns() - 2
        && candidate.row() >= 1
        && candidate.row() <= grid.rows() - 2;
    interior
        && grid.get(candidate).is_some_and(Tile::is_carved_floor)
        && !grid.neighbors(candidate).any(|neighbor| keys.contains(&neighbor))
}

/// Confirms the finish and every key are reachable from the start.
///
/// # Errors
///
/// Returns [`MazeError::PathNotFound`] for the first unreachable target.
pub fn verify_solvable(grid: &TileGrid, annotation: &Annotation) -> Result<(), MazeError> {
    let _ = shortest_path(grid, annotation.start, Goal::Cell(annotation.finish), Tile::Wall)?;
    for key in &annotation.keys {
        let _ = shortest_path(grid, annotation.start, Goal::Cell(*key), Tile::Wall)?;
    }
    Ok(())
}
