//! Input collaborator that plays a level without a human.

use the_maze_core::{Direction, Tile};
use the_maze_system_pathfinding::{shortest_path, Goal};
use the_maze_world::{query, Level};

/// Chooses the next move for the player.
///
/// The autopilot heads for the nearest key until enough keys are held and
/// then for the finish. It holds still rather than walk into a pursuer.
#[must_use]
pub(crate) fn intent(level: &Level) -> Option<Direction> {
    if query::movement_locked(level) {
        return None;
    }

    let goal = if query::door_open(level) {
        Goal::Tile(Tile::Finish)
    } else {
        Goal::Tile(Tile::Key)
    };
    let from = query::player_cell(level);
    let path = shortest_path(query::grid(level), from, goal, Tile::Wall).ok()?;
    let next = *path.get(1)?;

    if query::pursuer_view(level).iter().any(|pursuer| pursuer.cell == next) {
        return None;
    }
    Direction::between(from, next)
}
