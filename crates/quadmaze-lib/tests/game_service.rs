mod common;

use common::{c, line_maze, path, Services};
use quadmaze_lib::{
    Error, ErrorKind, GameRepository, GameStatus, MazeUpdate, NewMaze, Spot, ENTRANCE_SPOT,
    EXIT_SPOT,
};

#[test]
fn line_maze_plays_through_to_exit() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("line")).unwrap();

    let game = services.games.start(&maze_id, "first run").expect("playable");
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(game.player_stats.current_spot, "(0,0)");
    assert_eq!(game.player_stats.allowed_movements, vec!["(1,0)"]);
    assert_eq!(game.minimum_distance, 2.0);

    let game = services.games.move_to(&game.id, "(1,0)").expect("adjacent");
    assert_eq!(game.player_stats.current_spot, "(1,0)");
    assert_eq!(game.player_stats.distance_covered, 1.0);
    assert_eq!(game.player_stats.allowed_movements, vec!["(0,0)", "(2,0)"]);

    let game = services.games.move_to(&game.id, "(2,0)").expect("exit");
    assert_eq!(game.player_stats.current_spot, "(2,0)");
    assert_eq!(game.player_stats.distance_covered, 2.0);
    assert_eq!(game.status(), GameStatus::Finished);
    assert!(game.end_date.is_some());
    assert!(game.player_stats.allowed_movements.is_empty());
    assert_eq!(
        game.optimum_path,
        Some(vec!["(0,0)".into(), "(1,0)".into(), "(2,0)".into()])
    );

    assert_eq!(services.games.get(&game.id).unwrap(), game);
}

#[test]
fn skipping_to_exit_is_rejected_and_state_is_kept() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("shortcut")).unwrap();
    let game = services.games.start(&maze_id, "cheater").unwrap();

    let err = services
        .games
        .move_to(&game.id, "(2,0)")
        .expect_err("exit is not adjacent to entrance");
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    assert_eq!(services.games.get(&game.id).unwrap(), game);
}

#[test]
fn finished_game_ignores_further_moves() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("done")).unwrap();
    let game = services.games.start(&maze_id, "done").unwrap();
    services.games.move_to(&game.id, "(1,0)").unwrap();
    let finished = services.games.move_to(&game.id, "(2,0)").unwrap();

    for target in ["(1,0)", "(2,0)", "(42,42)"] {
        let again = services.games.move_to(&game.id, target).expect("no-op");
        assert_eq!(again, finished);
    }
    assert_eq!(
        services.games.get(&game.id).unwrap().player_stats.movements.len(),
        2
    );
}

#[test]
fn rewards_are_credited_once_across_revisits() {
    let services = Services::new();
    let maze_id = services
        .mazes
        .create(NewMaze {
            name: "loot".to_string(),
            center: None,
            spots: vec![
                Spot::new(ENTRANCE_SPOT, c(0, 0), 100),
                Spot::new("chest", c(0, 1), 25),
                Spot::new("coins", c(1, 1), 5),
                Spot::new(EXIT_SPOT, c(2, 1), 1),
            ],
            paths: vec![
                path((0, 0), (0, 1)),
                path((0, 1), (1, 1)),
                path((1, 1), (2, 1)),
            ],
        })
        .unwrap();
    let game = services.games.start(&maze_id, "greedy").unwrap();

    for target in ["(0,1)", "(1,1)", "(0,1)", "(0,0)", "(0,1)", "(1,1)"] {
        services.games.move_to(&game.id, target).unwrap();
    }
    let game = services.games.get(&game.id).unwrap();
    assert_eq!(game.player_stats.total_reward, 30);
    assert_eq!(game.player_stats.distance_covered, 6.0);

    let game = services.games.move_to(&game.id, "(2,1)").unwrap();
    assert_eq!(game.player_stats.total_reward, 31);
    assert!(game.is_finished());
}

#[test]
fn game_snapshot_is_isolated_from_maze_edits() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("snapshot")).unwrap();
    let game = services.games.start(&maze_id, "isolated").unwrap();

    services.mazes.delete_spot(&maze_id, c(1, 0)).unwrap();
    services
        .mazes
        .update(
            &maze_id,
            MazeUpdate {
                center: Some(c(-9, -9)),
                ..MazeUpdate::default()
            },
        )
        .unwrap();

    let moved = services.games.move_to(&game.id, "(1,0)").expect("snapshot still has mid");
    assert_eq!(moved.maze.center(), c(0, 0));
    assert!(moved.maze.find_spot("(1,0)").is_some());
}

#[test]
fn unplayable_mazes_cannot_start() {
    let services = Services::new();
    let mut request = line_maze("broken");
    request.paths.pop();
    let maze_id = services.mazes.create(request).unwrap();

    let err = services.games.start(&maze_id, "nope").unwrap_err();
    assert!(matches!(err, Error::MazeNotPlayable { .. }));
    assert_eq!(err.kind(), ErrorKind::Playability);
    assert!(services.repository.query_games("nope").unwrap().is_empty());

    let mut request = line_maze("no exit");
    request.spots.pop();
    request.paths.pop();
    let maze_id = services.mazes.create(request).unwrap();
    assert_eq!(
        services.games.start(&maze_id, "nope").unwrap_err().kind(),
        ErrorKind::Playability
    );
}

#[test]
fn start_validates_name_and_maze() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("names")).unwrap();

    assert!(matches!(
        services.games.start(&maze_id, ""),
        Err(Error::MissingName)
    ));
    assert!(matches!(
        services.games.start("unknown", "run"),
        Err(Error::MazeNotFound { .. })
    ));
}

#[test]
fn delete_and_query_games() {
    let services = Services::new();
    let maze_id = services.mazes.create(line_maze("query")).unwrap();
    let first = services.games.start(&maze_id, "Morning Run").unwrap();
    services.games.start(&maze_id, "Evening Run").unwrap();

    assert_eq!(services.games.query("run").unwrap().len(), 2);
    assert_eq!(services.games.query("MORNING").unwrap().len(), 1);

    services.games.delete(&first.id).unwrap();
    assert!(matches!(
        services.games.get(&first.id),
        Err(Error::GameNotFound { .. })
    ));
    assert_eq!(services.games.query("run").unwrap().len(), 1);
    services.games.delete(&first.id).expect("delete is unconditional");

    // Deleting games never touches the source maze.
    assert!(services.mazes.get(&maze_id).is_ok());
}

#[test]
fn moving_in_unknown_game_is_not_found() {
    let services = Services::new();
    let err = services.games.move_to("ghost", "(0,0)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn total_reward_saturates_instead_of_overflowing() {
    let services = Services::new();
    let maze_id = services
        .mazes
        .create(NewMaze {
            name: "treasure".into(),
            center: None,
            spots: vec![
                Spot::new(ENTRANCE_SPOT, c(0, 0), 0),
                Spot::new("hoard", c(1, 0), u64::MAX),
                Spot::new("coin", c(2, 0), 1),
                Spot::new(EXIT_SPOT, c(3, 0), 0),
            ],
            paths: vec![path((0, 0), (1, 0)), path((1, 0), (2, 0)), path((2, 0), (3, 0))],
        })
        .unwrap();
    let game = services.games.start(&maze_id, "greedy").unwrap();

    services.games.move_to(&game.id, "(1,0)").unwrap();
    let game = services.games.move_to(&game.id, "(2,0)").expect("no overflow");

    assert_eq!(game.player_stats.total_reward, u64::MAX);
    assert_eq!(game.player_stats.current_spot, "(2,0)");
}
