use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

const LINE_MAZE: &str = r#"{
    "name": "corridor",
    "spots": [
        { "name": "entrance", "coordinate": [0, 0] },
        { "name": "hall", "coordinate": [1, 0], "reward": 5 },
        { "name": "exit", "coordinate": [2, 0] }
    ],
    "paths": [
        { "origin": [0, 0], "destination": [1, 0] },
        { "origin": [1, 0], "destination": [2, 0] }
    ]
}"#;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("quadmaze");
    cmd.env("RUST_LOG", "error")
        .env_remove("QUADMAZE_DEFAULT_CENTER")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf8 stdout")
}

fn create_maze(temp: &TempDir, definition: &str) -> String {
    let file = temp.path().join("definition.json");
    fs::write(&file, definition).expect("write definition");
    let out = stdout_of(cli(temp.path()).args(["maze", "create", "--file"]).arg(&file));
    out.trim().to_string()
}

fn start_game(temp: &TempDir, maze_id: &str) -> Value {
    let args = ["game", "start", "--maze", maze_id, "--name", "speedrun"];
    let out = stdout_of(cli(temp.path()).args(args));
    serde_json::from_str(&out).expect("game json")
}

#[test]
fn create_then_get_round_trips_through_storage() {
    let temp = tempdir().expect("create temp dir");
    let id = create_maze(&temp, LINE_MAZE);
    assert!(temp.path().join("mazes").join(format!("{id}.json")).exists());

    let out = stdout_of(cli(temp.path()).args(["maze", "get", &id]));
    let maze: Value = serde_json::from_str(&out).expect("maze json");
    assert_eq!(maze["name"], "corridor");
    assert_eq!(maze["id"], id.as_str());
}

#[test]
fn game_plays_to_the_exit() {
    let temp = tempdir().expect("create temp dir");
    let maze_id = create_maze(&temp, LINE_MAZE);
    let game = start_game(&temp, &maze_id);
    let game_id = game["id"].as_str().expect("game id").to_string();
    assert_eq!(game["player_stats"]["current_spot"], "(0,0)");

    cli(temp.path())
        .args(["game", "move", &game_id, "--to", "1,0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("at (1,0)"));

    let out = stdout_of(cli(temp.path()).args(["game", "move", &game_id, "--to", "2,0"]));
    let finished: Value = serde_json::from_str(&out).expect("game json");
    assert!(finished["end_date"].is_string());
    assert_eq!(finished["player_stats"]["total_reward"], 5);
    assert_eq!(
        finished["optimum_path"],
        serde_json::json!(["(0,0)", "(1,0)", "(2,0)"])
    );
}

#[test]
fn illegal_move_fails_without_changing_the_game() {
    let temp = tempdir().expect("create temp dir");
    let maze_id = create_maze(&temp, LINE_MAZE);
    let game = start_game(&temp, &maze_id);
    let game_id = game["id"].as_str().expect("game id").to_string();

    cli(temp.path())
        .args(["game", "move", &game_id, "--to", "2,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not allowed"));

    let out = stdout_of(cli(temp.path()).args(["game", "get", &game_id]));
    let stored: Value = serde_json::from_str(&out).expect("game json");
    assert_eq!(stored["player_stats"]["current_spot"], "(0,0)");
}

#[test]
fn missing_maze_is_reported() {
    let temp = tempdir().expect("create temp dir");
    cli(temp.path())
        .args(["maze", "get", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn unplayable_maze_cannot_start_a_game() {
    let temp = tempdir().expect("create temp dir");
    let maze_id = create_maze(
        &temp,
        r#"{ "name": "lonely", "spots": [{ "name": "entrance", "coordinate": [0, 0] }] }"#,
    );

    cli(temp.path())
        .args(["game", "start", "--maze", &maze_id, "--name", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exit"));
}

#[test]
fn negative_coordinates_parse_as_values() {
    let temp = tempdir().expect("create temp dir");
    let maze_id = create_maze(
        &temp,
        r#"{
            "name": "west wing",
            "spots": [
                { "name": "entrance", "coordinate": [-1, -1] },
                { "name": "exit", "coordinate": [1, 1] }
            ],
            "paths": [{ "origin": [-1, -1], "destination": [1, 1] }]
        }"#,
    );

    cli(temp.path())
        .args(["maze", "delete-spot", &maze_id, "--at", "-1,-1"])
        .assert()
        .success();

    let out = stdout_of(cli(temp.path()).args(["maze", "get", &maze_id]));
    assert!(!out.contains("(-1,-1)"));
}

#[test]
fn query_lists_matching_mazes() {
    let temp = tempdir().expect("create temp dir");
    create_maze(&temp, LINE_MAZE);

    cli(temp.path())
        .args(["maze", "query", "CORR other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"corridor\""));

    cli(temp.path())
        .args(["maze", "query", "garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}
