use rand::Rng;
use the_maze_core::{MazeError, Position, PursuerSpawn, Tile, TileGrid};

/// Names drawn for spawned pursuers.
pub const PURSUER_NAMES: [&str; 3] = ["Base", "Petr", "Alfons"];

const MAX_PURSUERS: u32 = 3;

/// Number of pursuers hunting on a maze of the given size.
#[must_use]
pub fn pursuer_count(width: u32, height: u32) -> u32 {
    let count = (u64::from(width) * u64::from(height) + 100) / 600;
    u32::try_from(count.min(u64::from(MAX_PURSUERS))).unwrap_or(MAX_PURSUERS)
}

/// Places the pursuers of one level in the half of the maze away from the start.
///
/// Each pursuer first draws its name, then a row and a column from
/// `width / 2` to `width - 2`, redrawing both while the tile is a wall.
///
/// # Errors
///
/// Returns [`MazeError::NoOpenTile`] when the spawn region holds no floor.
pub fn spawn_pursuers<R>(grid: &TileGrid, rng: &mut R) -> Result<Vec<PursuerSpawn>, MazeError>
where
    R: Rng + ?Sized,
{
    let count = pursuer_count(grid.columns(), grid.rows());
    if count == 0 {
        return Ok(Vec::new());
    }

    let first_column = grid.columns() / 2;
    let last_column = grid.columns() - 2;
    let last_row = grid.rows() - 2;
    let open = grid.iter().any(|(position, tile)| {
        !tile.is_wall()
            && (first_column..=last_column).contains(&position.column())
            && (1..=last_row).contains(&position.row())
    });
    if !open {
        return Err(MazeError::NoOpenTile {
            column: first_column,
            anchor: "pursuer",
        });
    }

    let mut spawns = Vec::new();
    for _ in 0..count {
        let name = PURSUER_NAMES[rng.gen_range(0..PURSUER_NAMES.len())];
        let cell = loop {
            let row = rng.gen_range(1..=last_row);
            let column = rng.gen_range(first_column..=last_column);
            let candidate = Position::new(column, row);
            if !grid.is(candidate, Tile::Wall) {
                break candidate;
            }
        };
        spawns.push(PursuerSpawn {
            name: name.to_owned(),
            cell,
        });
    }
    Ok(spawns)
}
