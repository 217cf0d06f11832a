#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level state machine evaluation.
//!
//! Once per tick the rules inspect the level and emit at most one outcome
//! command. The checks run in a fixed order and the first one that applies
//! ends the evaluation:
//!
//! 1. player on the finish with enough keys wins;
//! 2. a pursuer able to kill on the player's tile loses the level;
//! 3. too few keys left to reach the requirement loses the level;
//! 4. a key under the player is resolved through the quiz gate;
//! 5. otherwise one directional intent is forwarded if movement is unlocked.

use std::time::Duration;

use the_maze_core::{Command, Direction, LevelStatus, LossReason, Quiz};
use the_maze_world::{query, Level};
use tracing::warn;

/// Pure system applying the win, loss, key and movement rules.
#[derive(Clone, Copy, Debug)]
pub struct Rules {
    quiz_budget: Duration,
}

impl Rules {
    /// Creates the rules with the time budget granted to each quiz question.
    #[must_use]
    pub const fn new(quiz_budget: Duration) -> Self {
        Self { quiz_budget }
    }

    /// Evaluates the level and emits the resulting command, if any.
    ///
    /// The quiz collaborator is consulted synchronously when the player stands
    /// on a key. A timed-out question counts as a wrong answer.
    pub fn handle(
        &self,
        level: &Level,
        intent: Option<Direction>,
        quiz: &mut dyn Quiz,
        out: &mut Vec<Command>,
    ) {
        if query::status(level) != LevelStatus::Playing {
            return;
        }

        let collected = query::keys_collected(level);
        let required = query::keys_required(level);

        if query::player_at_finish(level) && collected >= required {
            out.push(Command::DeclareWin);
        } else if let Some(name) = query::catching_pursuer(level) {
            out.push(Command::DeclareLoss {
                reason: LossReason::CaughtBy {
                    name: name.to_owned(),
                },
            });
        } else if collected + query::remaining_keys(level) < required {
            out.push(Command::DeclareLoss {
                reason: LossReason::InsufficientKeys,
            });
        } else if query::player_on_key(level) {
            let correct = match quiz.ask(self.quiz_budget) {
                Ok(correct) => correct,
                Err(timeout) => {
                    warn!(%timeout, cell = %query::player_cell(level), "quiz timed out");
                    false
                }
            };
            out.push(Command::ResolveKey { correct });
        } else if let Some(direction) = intent {
            if !query::movement_locked(level) {
                out.push(Command::MovePlayer { direction });
            }
        }
    }
}
