use std::time::Duration;

use the_maze_core::{Command, Direction, Event, Position, PursuerSpawn, Tile, TileGrid, ViewDistance};
use the_maze_system_pathfinding::DistanceField;
use the_maze_system_pursuit::{Config, Pursuit};
use the_maze_world::{self as world, query, Level, LevelConfig, Maze};

const TICK: Duration = Duration::from_millis(100);

fn ring_level() -> Level {
    let grid = TileGrid::from_rows(&[
        "###########",
        "#S.......F#",
        "#.#######.#",
        "#.........#",
        "###########",
    ]);
    let maze = Maze::scan(grid).expect("annotated grid");
    let spawn = PursuerSpawn {
        name: "Alfons".to_owned(),
        cell: Position::new(9, 3),
    };
    Level::new(
        maze,
        ViewDistance::Limited(4),
        &[spawn],
        LevelConfig::default(),
    )
}

fn pursuit() -> Pursuit {
    Pursuit::new(Config::new(
        Duration::from_millis(9000),
        Duration::from_millis(2000),
        30,
    ))
}

fn apply_all(level: &mut Level, commands: Vec<Command>, log: &mut Vec<Event>) {
    for command in commands {
        let mut events = Vec::new();
        world::apply(level, command, &mut events);
        log.extend(events);
    }
}

fn tick(level: &mut Level, pursuit: &mut Pursuit, log: &mut Vec<Event>) {
    let mut events = Vec::new();
    world::apply(level, Command::Tick { dt: TICK }, &mut events);

    let mut commands = Vec::new();
    pursuit
        .handle(
            &events,
            &query::pursuer_view(level),
            query::player_cell(level),
            query::grid(level),
            &mut commands,
        )
        .expect("ring is connected");
    log.extend(events);
    apply_all(level, commands, log);
}

fn run_until(level: &mut Level, pursuit: &mut Pursuit, until: Duration, log: &mut Vec<Event>) {
    while query::elapsed(level) < until {
        tick(level, pursuit, log);
    }
}

fn walk_player_south_twice(level: &mut Level, pursuit: &mut Pursuit, log: &mut Vec<Event>) {
    for _ in 0..2 {
        apply_all(
            level,
            vec![Command::MovePlayer {
                direction: Direction::South,
            }],
            log,
        );
        tick(level, pursuit, log);
        tick(level, pursuit, log);
    }
}

fn pursuer(level: &Level) -> the_maze_core::PursuerSnapshot {
    query::pursuer_view(level)
        .into_vec()
        .into_iter()
        .next()
        .expect("one pursuer")
}

#[test]
fn stale_belief_steers_pursuer_toward_old_position() {
    let mut level = ring_level();
    let mut pursuit = pursuit();
    let mut log = Vec::new();

    walk_player_south_twice(&mut level, &mut pursuit, &mut log);
    assert_eq!(query::player_cell(&level), Position::new(1, 3));

    run_until(&mut level, &mut pursuit, Duration::from_millis(2000), &mut log);

    let snapshot = pursuer(&level);
    assert_eq!(snapshot.believed, Position::new(1, 1));
    assert_eq!(snapshot.cell, Position::new(9, 2));

    let to_player = DistanceField::flood(query::grid(&level), query::player_cell(&level), Tile::Wall);
    assert!(
        to_player.distance(snapshot.cell) > to_player.distance(Position::new(9, 3)),
        "stale pursuer should have moved away from the true player"
    );
}

#[test]
fn every_step_closes_in_on_the_believed_position() {
    let mut level = ring_level();
    let mut pursuit = pursuit();
    let mut log = Vec::new();

    walk_player_south_twice(&mut level, &mut pursuit, &mut log);
    run_until(&mut level, &mut pursuit, Duration::from_millis(12_000), &mut log);

    let mut believed = Position::new(1, 1);
    let mut steps = 0;
    for event in &log {
        match event {
            Event::PursuerBeliefsRefreshed { believed: refreshed } => believed = *refreshed,
            Event::PursuerAdvanced { from, to, .. } => {
                let field = DistanceField::flood(query::grid(&level), believed, Tile::Wall);
                assert!(field.distance(*to) < field.distance(*from));
                steps += 1;
            }
            _ => {}
        }
    }

    assert_eq!(steps, 6);
    assert_eq!(pursuer(&level).believed, Position::new(1, 3));
    let alarms = log
        .iter()
        .filter(|event| matches!(event, Event::Alarm { .. }))
        .count();
    assert_eq!(alarms, steps);
}

#[test]
fn out_of_range_pursuer_goes_dormant() {
    let mut rows = vec!["#".repeat(30)];
    rows.push(format!("#S{}F#", ".".repeat(26)));
    rows.push("#".repeat(30));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let maze = Maze::scan(TileGrid::from_rows(&rows)).expect("annotated grid");
    let spawn = PursuerSpawn {
        name: "Base".to_owned(),
        cell: Position::new(27, 1),
    };
    let mut level = Level::new(
        maze,
        ViewDistance::Unlimited,
        &[spawn],
        LevelConfig::default(),
    );
    let mut pursuit = pursuit();
    let mut log = Vec::new();

    run_until(&mut level, &mut pursuit, Duration::from_millis(4000), &mut log);

    assert_eq!(pursuer(&level).cell, Position::new(27, 1));
    assert!(!log
        .iter()
        .any(|event| matches!(event, Event::PursuerAdvanced { .. } | Event::Alarm { .. })));
}
