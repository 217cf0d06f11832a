use std::fmt::Write as _;

use the_maze_core::{Position, PursuerSpawn, Tile, TileGrid};

fn glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Path => ' ',
        Tile::Start => 'S',
        Tile::Finish => 'F',
        Tile::Key => 'K',
        Tile::Visited => '.',
    }
}

/// Draws the grid one row per line; pursuers show as the lowercase initial of their name.
pub(crate) fn render(grid: &TileGrid, pursuers: &[PursuerSpawn]) -> String {
    let mut out = String::with_capacity(((grid.columns() + 1) * grid.rows()) as usize);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = Position::new(column, row);
            let symbol = pursuers
                .iter()
                .find(|pursuer| pursuer.cell == cell)
                .and_then(|pursuer| pursuer.name.chars().next())
                .map(|initial| initial.to_ascii_lowercase())
                .or_else(|| grid.get(cell).map(glyph))
                .unwrap_or('?');
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

/// One-line legend printed under a rendered maze.
pub(crate) fn legend(grid: &TileGrid, pursuers: &[PursuerSpawn]) -> String {
    let mut legend = format!(
        "{}x{} maze, {} keys",
        grid.columns(),
        grid.rows(),
        grid.count(Tile::Key)
    );
    for pursuer in pursuers {
        let _ = write!(legend, ", {} at {}", pursuer.name, pursuer.cell);
    }
    legend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tiles_and_pursuers() {
        let rows = ["#######", "#S.K.F#", "#######"];
        let grid = TileGrid::from_rows(&rows);
        let pursuers = [PursuerSpawn {
            name: "Alfons".to_owned(),
            cell: Position::new(4, 1),
        }];
        assert_eq!(render(&grid, &pursuers), "#######\n#S KaF#\n#######\n");
        assert_eq!(legend(&grid, &pursuers), "7x3 maze, 1 keys, Alfons at (4, 1)");
    }
}
