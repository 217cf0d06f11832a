use rand::Rng;
use the_maze_core::{MazeError, Position, Tile, TileGrid, MIN_MAZE_DIMENSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Wall,
    Cell,
    Passage,
}

struct Lattice {
    width: u32,
    height: u32,
    marks: Vec<Mark>,
}

impl Lattice {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            marks: vec![Mark::Wall; width as usize * height as usize],
        }
    }

    fn index(&self, column: u32, row: u32) -> usize {
        row as usize * self.width as usize + column as usize
    }

    fn mark(&self, column: u32, row: u32) -> Mark {
        self.marks[self.index(column, row)]
    }

    fn set(&mut self, column: u32, row: u32, mark: Mark) {
        let index = self.index(column, row);
        self.marks[index] = mark;
    }

    fn is_interior(&self, column: u32, row: u32) -> bool {
        column > 0 && column < self.width - 1 && row > 0 && row < self.height - 1
    }

    /// Marks an interior lattice cell as carved and queues its four neighbours.
    fn open_cell(&mut self, column: u32, row: u32, frontier: &mut Vec<Position>) {
        if !self.is_interior(column, row) {
            return;
        }
        self.set(column, row, Mark::Cell);
        frontier.extend([
            Position::new(column + 1, row),
            Position::new(column, row + 1),
            Position::new(column - 1, row),
            Position::new(column, row - 1),
        ]);
    }

    fn is_candidate(&self, wall: Position) -> bool {
        self.is_interior(wall.column(), wall.row())
            && self.mark(wall.column(), wall.row()) != Mark::Passage
    }

    /// Carves `wall` when exactly one side already touches a carved cell,
    /// then opens the cell on the opposite side.
    fn carve(&mut self, wall: Position, frontier: &mut Vec<Position>) {
        let (column, row) = (wall.column(), wall.row());
        let right = self.mark(column + 1, row) == Mark::Cell;
        let down = self.mark(column, row + 1) == Mark::Cell;
        let left = self.mark(column - 1, row) == Mark::Cell;
        let up = self.mark(column, row - 1) == Mark::Cell;

        if [right, down, left, up].into_iter().filter(|side| *side).count() != 1 {
            return;
        }

        self.set(column, row, Mark::Passage);
        if right {
            self.open_cell(column - 1, row, frontier);
        } else if left {
            self.open_cell(column + 1, row, frontier);
        } else if down {
            self.open_cell(column, row - 1, frontier);
        } else {
            self.open_cell(column, row + 1, frontier);
        }
    }

    fn into_grid(self) -> TileGrid {
        let mut grid = TileGrid::filled(self.width, self.height, Tile::Wall);
        for row in 0..self.height {
            for column in 0..self.width {
                if self.mark(column, row) != Mark::Wall {
                    let _ = grid.set(Position::new(column, row), Tile::Path);
                }
            }
        }
        grid
    }
}

/// Generates a spanning-tree maze with randomized Prim's algorithm.
///
/// Carved lattice cells sit on odd coordinates. The frontier keeps duplicate
/// wall coordinates; before every draw it is pruned of carved passages and
/// border positions, then one entry is drawn uniformly and its first
/// occurrence removed. This draw policy is what makes a seed reproduce the
/// same maze, so it must not change.
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] when either side is below
/// [`MIN_MAZE_DIMENSION`].
pub fn generate<R>(width: u32, height: u32, rng: &mut R) -> Result<TileGrid, MazeError>
where
    R: Rng + ?Sized,
{
    if width < MIN_MAZE_DIMENSION || height < MIN_MAZE_DIMENSION {
        return Err(MazeError::InvalidDimensions { width, height });
    }

    let mut lattice = Lattice::new(width, height);
    let mut frontier = Vec::new();

    let column = 1 + 2 * rng.gen_range(0..(width - 1) / 2);
    let row = 1 + 2 * rng.gen_range(0..(height - 1) / 2);
    lattice.open_cell(column, row, &mut frontier);

    loop {
        frontier.retain(|wall| lattice.is_candidate(*wall));
        if frontier.is_empty() {
            break;
        }

        let wall = frontier[rng.gen_range(0..frontier.len())];
        lattice.carve(wall, &mut frontier);
        if let Some(index) = frontier.iter().position(|candidate| *candidate == wall) {
            let _ = frontier.remove(index);
        }
    }

    Ok(lattice.into_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_small_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            generate(4, 9, &mut rng),
            Err(MazeError::InvalidDimensions {
                width: 4,
                height: 9,
            })
        );
        assert!(generate(9, 3, &mut rng).is_err());
    }

    #[test]
    fn lattice_indexes_past_u32_range() {
        let lattice = Lattice {
            width: 70_000,
            height: 70_000,
            marks: Vec::new(),
        };
        assert_eq!(lattice.index(69_999, 69_999), 4_899_999_999);
    }

    #[test]
    fn border_stays_walled() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate(15, 9, &mut rng).expect("valid dimensions");
        for (position, tile) in grid.iter() {
            let border = position.column() == 0
                || position.row() == 0
                || position.column() == 14
                || position.row() == 8;
            if border {
                assert_eq!(tile, Tile::Wall, "border opened at {position}");
            }
        }
    }

    #[test]
    fn odd_lattice_cells_are_all_carved() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let grid = generate(11, 7, &mut rng).expect("valid dimensions");
        for row in (1..6).step_by(2) {
            for column in (1..10).step_by(2) {
                assert!(grid.is(Position::new(column, row), Tile::Path));
            }
        }
        for row in (2..6).step_by(2) {
            for column in (2..10).step_by(2) {
                assert!(grid.is(Position::new(column, row), Tile::Wall));
            }
        }
    }
}
