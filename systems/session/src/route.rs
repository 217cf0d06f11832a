use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use the_maze_core::{MazeError, Position, Tile, TileGrid};
use the_maze_system_maze_generation as maze_generation;
use the_maze_system_pathfinding::{shortest_path, Goal};
use tracing::debug;

use crate::{level_dimensions, record::GameMode, settings::Difficulty};

/// Length of the greedy key-collecting route through every level of a seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteEstimate {
    /// Seed the levels were built from.
    pub seed: i64,
    /// Difficulty that sized the levels.
    pub difficulty: Difficulty,
    /// Route length of each level, in tiles.
    pub level_lengths: Vec<usize>,
    /// Sum of `level_lengths`.
    pub total: usize,
}

/// Builds the speedrun levels of `seed` and measures a route through each.
///
/// The route walks to the nearest key until half of the level's keys are
/// held, then to the finish. Levels are generated from the same random
/// stream a speedrun session would use, so the estimate describes the run
/// a player would get with that seed.
///
/// # Errors
///
/// Propagates [`MazeError`] from generation or the route search.
pub fn estimate_route(seed: i64, difficulty: Difficulty, levels: u32) -> Result<RouteEstimate, MazeError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let mut level_lengths = Vec::new();

    for index in 0..levels {
        let (width, height) = level_dimensions(GameMode::Speedrun, difficulty, index);
        let blueprint = maze_generation::build(width, height, &mut rng)?;
        let required = blueprint.annotation.keys.len() / 2;
        let length = greedy_route(blueprint.grid, blueprint.annotation.start, required)?;
        level_lengths.push(length);
    }

    let total = level_lengths.iter().sum();
    debug!(seed, %difficulty, total, "route estimated");

    Ok(RouteEstimate {
        seed,
        difficulty,
        level_lengths,
        total,
    })
}

fn greedy_route(mut grid: TileGrid, start: Position, required: usize) -> Result<usize, MazeError> {
    let mut cursor = start;
    let mut length = 0;

    for _ in 0..required {
        let path = shortest_path(&grid, cursor, Goal::Tile(Tile::Key), Tile::Wall)?;
        length += path.len();
        if let Some(&key) = path.last() {
            let _ = grid.set(key, Tile::Visited);
            cursor = key;
        }
    }

    let path = shortest_path(&grid, cursor, Goal::Tile(Tile::Finish), Tile::Wall)?;
    Ok(length + path.len())
}
