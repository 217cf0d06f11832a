#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter for The Maze.
//!
//! Runs play through an autopilot and a scripted quiz so whole runs can be
//! replayed from a seed. Logs go to stderr; results are printed to stdout.

mod ascii;
mod autopilot;
mod quiz;

use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use the_maze_core::{Event, LevelStatus};
use the_maze_system_maze_generation as maze_generation;
use the_maze_system_session::{
    estimate_route, Difficulty, FrameInput, GameMode, MenuSelection, PlayerSpeed, Progress,
    RouteEstimate, RunRecord, Session, Settings, SPEEDRUN_LEVELS,
};
use the_maze_world::query;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::quiz::ScriptedQuiz;

const FRAME: Duration = Duration::from_millis(16);

/// Plays, searches and previews seeded mazes.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plays a run with the autopilot and prints its record as JSON.
    Play(PlayArgs),
    /// Searches random seeds for the shortest speedrun route.
    Seeds(SeedsArgs),
    /// Prints a freshly generated maze.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[arg(long, default_value = "speedrun")]
    mode: GameMode,
    /// Overrides the difficulty from the settings file.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Overrides the player speed from the settings file.
    #[arg(long)]
    speed: Option<PlayerSpeed>,
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
    /// Stops the run after this many won levels.
    #[arg(long)]
    levels: Option<u32>,
    /// TOML settings file; missing files fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Probability that a quiz question is answered correctly.
    #[arg(long, default_value_t = 1.0)]
    quiz_accuracy: f64,
    /// Logical minutes after which the autopilot gives up.
    #[arg(long, default_value_t = 60)]
    max_minutes: u64,
}

#[derive(Args, Debug)]
struct SeedsArgs {
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,
    /// Number of random seeds to evaluate.
    #[arg(long, default_value_t = 100)]
    count: u32,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[arg(long, default_value_t = 21)]
    width: u32,
    #[arg(long, default_value_t = 11)]
    height: u32,
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SeedReport {
    difficulty: Difficulty,
    evaluated: u32,
    best: RouteEstimate,
}

fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Commands::Play(args) => {
            let record = play(&args)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Seeds(args) => {
            let report = find_seed(&args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Show(args) => show(&args)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn play(args: &PlayArgs) -> Result<RunRecord> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(speed) = args.speed {
        settings.player_speed = speed;
    }

    let mut session = Session::start(args.mode, settings, args.seed, args.levels)
        .context("failed to start the run")?;
    let mut quiz = ScriptedQuiz::new(args.quiz_accuracy, session.seed());
    let budget = Duration::from_secs(args.max_minutes.saturating_mul(60));
    let mut played = Duration::ZERO;
    let mut events = Vec::new();

    while session.record().is_none() {
        let input = if played < budget {
            played += FRAME;
            FrameInput {
                direction: autopilot::intent(session.level()),
                ..FrameInput::default()
            }
        } else {
            surrender(&session)
        };

        events.clear();
        let progress = session
            .tick(FRAME, &input, &mut quiz, &mut events)
            .with_context(|| format!("run aborted on level {}", session.level_number()))?;

        for event in &events {
            match event {
                Event::Alarm { name, .. } => debug!(%name, "pursuer closing in"),
                Event::KeysProgress {
                    collected,
                    required,
                } => debug!(collected, required, "keys"),
                _ => {}
            }
        }
        if let Progress::LevelStarted { number, .. } = progress {
            debug!(number, played_ms = played.as_millis() as u64, "autopilot continues");
        }
    }

    session
        .record()
        .cloned()
        .ok_or_else(|| anyhow!("run ended without a record"))
}

fn surrender(session: &Session) -> FrameInput {
    if query::status(session.level()) == LevelStatus::Paused {
        FrameInput {
            menu: Some(MenuSelection::GiveUp),
            ..FrameInput::default()
        }
    } else {
        warn!(level = session.level_number(), "autopilot out of time, giving up");
        FrameInput {
            pause: true,
            ..FrameInput::default()
        }
    }
}

fn find_seed(args: &SeedsArgs) -> Result<SeedReport> {
    let mut best: Option<RouteEstimate> = None;

    for _ in 0..args.count {
        let seed = rand::random::<i64>();
        let estimate = estimate_route(seed, args.difficulty, SPEEDRUN_LEVELS)
            .with_context(|| format!("failed to estimate seed {seed}"))?;
        debug!(seed, total = estimate.total, "seed evaluated");
        if best.as_ref().map_or(true, |current| estimate.total < current.total) {
            info!(seed, total = estimate.total, "new shortest route");
            best = Some(estimate);
        }
    }

    let best = best.ok_or_else(|| anyhow!("no seeds evaluated; pass --count of at least 1"))?;
    Ok(SeedReport {
        difficulty: args.difficulty,
        evaluated: args.count,
        best,
    })
}

fn show(args: &ShowArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random::<i64>);
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let blueprint = maze_generation::build(args.width, args.height, &mut rng)
        .with_context(|| format!("failed to build a {}x{} maze", args.width, args.height))?;

    print!("{}", ascii::render(&blueprint.grid, &blueprint.pursuers));
    println!("{}", ascii::legend(&blueprint.grid, &blueprint.pursuers));
    println!("seed {seed}");
    Ok(())
}
