use std::time::Duration;

use the_maze_core::{AnimationInProgress, Direction};

/// Turns a discrete one-tile move into a timed interpolation window.
///
/// The animator is the movement lock of a single actor: while a heading is
/// held no further move may start. Callers advance it once per tick and read
/// [`MovementAnimator::progress`] instead of being pushed updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementAnimator {
    length: Duration,
    elapsed: Duration,
    heading: Option<Direction>,
}

impl MovementAnimator {
    /// Creates an idle animator whose moves last `length`.
    #[must_use]
    pub const fn new(length: Duration) -> Self {
        Self {
            length,
            elapsed: Duration::ZERO,
            heading: None,
        }
    }

    /// Begins animating a move toward `direction`.
    pub fn start(&mut self, direction: Direction) -> Result<(), AnimationInProgress> {
        if let Some(heading) = self.heading {
            return Err(AnimationInProgress { heading });
        }
        self.heading = Some(direction);
        self.elapsed = Duration::ZERO;
        Ok(())
    }

    /// Advances the running animation, yielding its heading once it completes.
    ///
    /// Completion clears the lock and resets the elapsed counter to zero.
    pub fn advance(&mut self, dt: Duration) -> Option<Direction> {
        let heading = self.heading?;
        self.elapsed = self.elapsed.saturating_add(dt).min(self.length);
        if self.elapsed < self.length {
            return None;
        }
        self.elapsed = Duration::ZERO;
        self.heading = None;
        Some(heading)
    }

    /// Fractional progress of the running animation in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.heading.is_none() || self.length.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f32() / self.length.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Reports whether a move is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.heading.is_some()
    }

    /// Heading of the move in flight.
    #[must_use]
    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Length of a full move.
    #[must_use]
    pub const fn length(&self) -> Duration {
        self.length
    }

    /// Changes the length used by the current and subsequent moves.
    pub fn set_length(&mut self, length: Duration) {
        self.length = length;
        self.elapsed = self.elapsed.min(length);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_is_rejected_while_running() {
        let mut animator = MovementAnimator::new(Duration::from_millis(150));
        animator.start(Direction::East).expect("idle animator starts");
        let error = animator
            .start(Direction::North)
            .expect_err("running animator must refuse");
        assert_eq!(error.heading, Direction::East);
        assert_eq!(animator.heading(), Some(Direction::East));
    }

    #[test]
    fn completes_after_configured_length() {
        let mut animator = MovementAnimator::new(Duration::from_millis(150));
        animator.start(Direction::South).expect("start");

        assert_eq!(animator.advance(Duration::from_millis(100)), None);
        assert!((animator.progress() - 2.0 / 3.0).abs() < 1e-4);

        assert_eq!(
            animator.advance(Duration::from_millis(100)),
            Some(Direction::South)
        );
        assert!(!animator.is_active());
        assert_eq!(animator.progress(), 0.0);
        animator.start(Direction::West).expect("lock released");
    }

    #[test]
    fn idle_animator_ignores_time() {
        let mut animator = MovementAnimator::new(Duration::from_millis(100));
        assert_eq!(animator.advance(Duration::from_secs(5)), None);
        assert_eq!(animator.progress(), 0.0);
    }

    #[test]
    fn shortening_clamps_elapsed_time() {
        let mut animator = MovementAnimator::new(Duration::from_millis(200));
        animator.start(Direction::North).expect("start");
        assert_eq!(animator.advance(Duration::from_millis(150)), None);
        animator.set_length(Duration::from_millis(100));
        assert_eq!(
            animator.advance(Duration::ZERO),
            Some(Direction::North)
        );
    }
}
