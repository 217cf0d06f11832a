use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use the_maze_core::{Direction, Event, LossReason, Quiz, QuizTimeout, Tile};
use the_maze_system_pathfinding::{shortest_path, Goal};
use the_maze_system_session::{
    Difficulty, FrameInput, GameMode, MenuSelection, PlayerSpeed, Progress, RunOutcome,
    Session, Settings,
};
use the_maze_world::{query, Level};

const FRAME: Duration = Duration::from_millis(16);
const FRAME_CAP: usize = 200_000;

struct FixedQuiz(bool);

impl Quiz for FixedQuiz {
    fn ask(&mut self, _budget: Duration) -> Result<bool, QuizTimeout> {
        Ok(self.0)
    }
}

/// Walks toward the nearest key until enough are held, then to the finish.
fn intent(level: &Level) -> Option<Direction> {
    if query::movement_locked(level) {
        return None;
    }
    let goal = if query::keys_collected(level) >= query::keys_required(level) {
        Goal::Tile(Tile::Finish)
    } else {
        Goal::Tile(Tile::Key)
    };
    let path = shortest_path(query::grid(level), query::player_cell(level), goal, Tile::Wall).ok()?;
    path.get(1)
        .and_then(|next| Direction::between(query::player_cell(level), *next))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    events: Vec<String>,
    outcome: RunOutcome,
    level_times_ms: Vec<u64>,
    score: Option<i64>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

fn run(mode: GameMode, settings: Settings, seed: i64, levels: u32, answers: bool) -> ReplayOutcome {
    let mut session = Session::start(mode, settings, Some(seed), Some(levels)).expect("start");
    let mut quiz = FixedQuiz(answers);
    let mut events = Vec::new();

    for _ in 0..FRAME_CAP {
        let input = FrameInput {
            direction: intent(session.level()),
            ..FrameInput::default()
        };
        let mut frame = Vec::new();
        let progress = session
            .tick(FRAME, &input, &mut quiz, &mut frame)
            .expect("generated levels are sound");
        events.extend(frame.iter().map(|event| format!("{event:?}")));
        if progress == Progress::Finished {
            break;
        }
    }

    let record = session.record().expect("run finished within the frame cap");
    assert!(record.verify());
    ReplayOutcome {
        events,
        outcome: record.outcome.clone(),
        level_times_ms: record.level_times_ms.clone(),
        score: record.score,
    }
}

#[test]
fn same_seed_replays_identically() {
    let first = run(GameMode::Endless, Settings::default(), 1234, 3, true);
    let second = run(GameMode::Endless, Settings::default(), 1234, 3, true);

    assert_eq!(first.outcome, RunOutcome::Completed);
    assert_eq!(first.level_times_ms.len(), 3);
    assert!(first.score.is_some());
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first, second);
}

#[test]
fn different_seeds_build_different_levels() {
    let first = Session::start(GameMode::Endless, Settings::default(), Some(1), None).expect("start");
    let second = Session::start(GameMode::Endless, Settings::default(), Some(2), None).expect("start");
    assert_ne!(query::grid(first.level()), query::grid(second.level()));
}

#[test]
fn speedrun_records_every_level_without_a_score() {
    let replay = run(GameMode::Speedrun, Settings::default(), -9, 2, true);
    assert_eq!(replay.outcome, RunOutcome::Completed);
    assert_eq!(replay.level_times_ms.len(), 2);
    assert!(replay.level_times_ms.iter().all(|time| *time > 0));
    assert_eq!(replay.score, None);
}

#[test]
fn wrong_answers_starve_the_run() {
    let replay = run(GameMode::Endless, Settings::default(), 77, 3, false);
    assert_eq!(
        replay.outcome,
        RunOutcome::Lost {
            level: 1,
            reason: LossReason::InsufficientKeys,
        }
    );
    assert!(replay.level_times_ms.is_empty());
    assert_eq!(replay.score, Some(0));
}

#[test]
fn levels_grow_between_wins() {
    let mut session =
        Session::start(GameMode::Endless, Settings::default(), Some(5), Some(2)).expect("start");
    let mut quiz = FixedQuiz(true);
    let mut started = None;

    for _ in 0..FRAME_CAP {
        let input = FrameInput {
            direction: intent(session.level()),
            ..FrameInput::default()
        };
        let mut events = Vec::new();
        match session.tick(FRAME, &input, &mut quiz, &mut events).expect("tick") {
            Progress::LevelStarted { number, width, height } => {
                started = Some((number, width, height));
                break;
            }
            Progress::Finished => break,
            Progress::Continuing => {}
        }
    }

    assert_eq!(started, Some((2, 15, 9)));
    assert_eq!(session.dimensions(), (15, 9));
    assert_eq!(query::elapsed(session.level()), Duration::ZERO);
}

#[test]
fn pause_menu_gives_up_the_run() {
    let mut settings = Settings::default();
    settings.difficulty = Difficulty::Hard;
    let mut session = Session::start(GameMode::Speedrun, settings, Some(11), None).expect("start");
    let mut quiz = FixedQuiz(true);
    let mut events = Vec::new();

    let pause = FrameInput {
        pause: true,
        ..FrameInput::default()
    };
    assert_eq!(
        session.tick(FRAME, &pause, &mut quiz, &mut events).expect("tick"),
        Progress::Continuing
    );
    assert_eq!(events, vec![Event::Paused]);

    for _ in 0..10 {
        let _ = session
            .tick(Duration::from_secs(1), &FrameInput::default(), &mut quiz, &mut events)
            .expect("tick");
    }
    assert_eq!(query::elapsed(session.level()), Duration::ZERO);

    let speed = FrameInput {
        menu: Some(MenuSelection::PlayerSpeed(PlayerSpeed::Fast)),
        ..FrameInput::default()
    };
    let _ = session.tick(FRAME, &speed, &mut quiz, &mut events).expect("tick");
    assert_eq!(session.settings().player_speed, PlayerSpeed::Fast);
    assert_eq!(
        query::animation_length(session.level()),
        Duration::from_millis(100)
    );

    let give_up = FrameInput {
        menu: Some(MenuSelection::GiveUp),
        ..FrameInput::default()
    };
    assert_eq!(
        session.tick(FRAME, &give_up, &mut quiz, &mut events).expect("tick"),
        Progress::Finished
    );

    let record = session.record().expect("finished");
    assert_eq!(
        record.outcome,
        RunOutcome::Lost {
            level: 1,
            reason: LossReason::GaveUp,
        }
    );
    assert_eq!(record.category.difficulty, Some(Difficulty::Hard));
    assert_eq!(record.score, None);
    assert!(record.verify());
}

#[test]
fn pause_toggles_back_to_playing() {
    let mut session =
        Session::start(GameMode::Endless, Settings::default(), Some(8), None).expect("start");
    let mut quiz = FixedQuiz(true);
    let mut events = Vec::new();
    let pause = FrameInput {
        pause: true,
        ..FrameInput::default()
    };

    let _ = session.tick(FRAME, &pause, &mut quiz, &mut events).expect("tick");
    let _ = session.tick(FRAME, &pause, &mut quiz, &mut events).expect("tick");
    assert_eq!(events, vec![Event::Paused, Event::Resumed]);

    let _ = session
        .tick(FRAME, &FrameInput::default(), &mut quiz, &mut events)
        .expect("tick");
    assert_eq!(query::elapsed(session.level()), FRAME);
}
