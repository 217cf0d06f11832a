#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded maze construction for The Maze.
//!
//! Building a level consumes the run's random source in a fixed order: the
//! spanning-tree carve, then start and finish rows, then keys, then pursuer
//! spawns. Reordering any of these draws changes every later level of a seed.

mod annotate;
mod prim;
mod spawn;

use rand::Rng;
use the_maze_core::{Annotation, MazeError, PursuerSpawn, TileGrid};
use tracing::debug;

pub use annotate::{annotate, key_count, verify_solvable};
pub use prim::generate;
pub use spawn::{pursuer_count, spawn_pursuers, PURSUER_NAMES};

/// Everything needed to construct one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    /// Annotated tile layout.
    pub grid: TileGrid,
    /// Start, finish and key placement.
    pub annotation: Annotation,
    /// Pursuers to spawn.
    pub pursuers: Vec<PursuerSpawn>,
}

/// Generates, annotates, validates and populates a maze.
///
/// # Errors
///
/// Propagates [`MazeError`] from every stage; none of them are retried.
pub fn build<R>(width: u32, height: u32, rng: &mut R) -> Result<Blueprint, MazeError>
where
    R: Rng + ?Sized,
{
    let mut grid = generate(width, height, rng)?;
    let annotation = annotate(&mut grid, rng)?;
    verify_solvable(&grid, &annotation)?;
    let pursuers = spawn_pursuers(&grid, rng)?;

    debug!(
        width,
        height,
        start = %annotation.start,
        finish = %annotation.finish,
        keys = annotation.keys.len(),
        pursuers = pursuers.len(),
        "maze built"
    );

    Ok(Blueprint {
        grid,
        annotation,
        pursuers,
    })
}
