use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use the_maze_core::{Quiz, QuizTimeout};
use tracing::debug;

/// Quiz collaborator that answers correctly with a fixed probability.
#[derive(Debug)]
pub(crate) struct ScriptedQuiz {
    rng: ChaCha8Rng,
    accuracy: f64,
}

impl ScriptedQuiz {
    /// `accuracy` is clamped to `0.0..=1.0`; the answers are reproducible per seed.
    pub(crate) fn new(accuracy: f64, seed: i64) -> Self {
        let accuracy = if accuracy.is_nan() {
            0.0
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
            accuracy,
        }
    }
}

impl Quiz for ScriptedQuiz {
    fn ask(&mut self, budget: Duration) -> Result<bool, QuizTimeout> {
        let correct = self.rng.gen_bool(self.accuracy);
        debug!(correct, budget_ms = budget.as_millis() as u64, "quiz answered");
        Ok(correct)
    }
}
