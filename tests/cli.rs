//! End-to-end tests for the `dfl` binary.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("test.drill")
}

fn dfl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dfl").unwrap();
    cmd.arg("--db").arg(db_path(dir));
    cmd
}

fn stdout_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = dfl(dir).arg("--json").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "command {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn init_creates_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();

    dfl(&dir).arg("init").assert().success();
    assert!(db_path(&dir).exists());

    // Second init without --force fails with the database exit code.
    dfl(&dir).arg("init").assert().failure().code(2);

    dfl(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    dfl(&dir)
        .args(["marcher", "list"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn marcher_page_move_undo_redo_flow() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    let marchers = stdout_json(
        &dir,
        &["marcher", "add", "Trumpet", "T", "--count", "2"],
    );
    assert_eq!(marchers.as_array().unwrap().len(), 2);
    assert_eq!(marchers[0]["drill_number"], "T1");

    stdout_json(&dir, &["page", "add", "--counts", "16"]);

    // Both marchers got a default placement on the new page.
    let coords = stdout_json(&dir, &["page", "coords", "1"]);
    assert_eq!(coords.as_array().unwrap().len(), 2);
    assert_eq!(coords[0]["x"], 100.0);

    dfl(&dir)
        .args(["move", "1", "1", "42.5", "7.25"])
        .assert()
        .success();
    let coords = stdout_json(&dir, &["page", "coords", "1"]);
    assert_eq!(coords[0]["x"], 42.5);

    // Undo the move; the coordinate returns to the default.
    let undone = stdout_json(&dir, &["undo"]);
    assert_eq!(undone["success"], true);
    let coords = stdout_json(&dir, &["page", "coords", "1"]);
    assert_eq!(coords[0]["x"], 100.0);

    // Redo reapplies it.
    let redone = stdout_json(&dir, &["redo"]);
    assert_eq!(redone["success"], true);
    let coords = stdout_json(&dir, &["page", "coords", "1"]);
    assert_eq!(coords[0]["x"], 42.5);
}

#[test]
fn undo_on_empty_history_is_a_noop() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    let response = stdout_json(&dir, &["undo"]);
    assert_eq!(response["success"], true);
    assert_eq!(response["sql_statements"].as_array().unwrap().len(), 0);
}

#[test]
fn undo_removes_whole_marcher_batch() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    stdout_json(&dir, &["page", "add", "--counts", "8"]);
    stdout_json(
        &dir,
        &["marcher", "add", "Baritone", "B", "--count", "4"],
    );
    assert_eq!(
        stdout_json(&dir, &["marcher", "list"]).as_array().unwrap().len(),
        4
    );

    // One undo reverses the whole add (marchers and placements).
    stdout_json(&dir, &["undo"]);
    assert!(stdout_json(&dir, &["marcher", "list"])
        .as_array()
        .unwrap()
        .is_empty());
    assert!(stdout_json(&dir, &["page", "coords", "1"])
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn history_status_and_limit() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    stdout_json(&dir, &["marcher", "add", "Flute", "F"]);
    stdout_json(&dir, &["undo"]);

    let status = stdout_json(&dir, &["history", "status"]);
    assert_eq!(status["undo_groups"], 0);
    assert_eq!(status["redo_groups"], 1);
    assert_eq!(status["group_limit"], 100);

    stdout_json(&dir, &["history", "limit", "25"]);
    let status = stdout_json(&dir, &["history", "status"]);
    assert_eq!(status["group_limit"], 25);
}

#[test]
fn new_mutation_invalidates_redo() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    stdout_json(&dir, &["marcher", "add", "Snare", "S"]);
    stdout_json(&dir, &["undo"]);
    stdout_json(&dir, &["marcher", "add", "Tenor", "TD"]);

    let status = stdout_json(&dir, &["history", "status"]);
    assert_eq!(status["redo_groups"], 0);
}

#[test]
fn not_found_errors_use_exit_code_3() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    dfl(&dir)
        .args(["marcher", "update", "99", "--name", "ghost"])
        .assert()
        .failure()
        .code(3);
    dfl(&dir)
        .args(["page", "coords", "99"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn appearance_set_and_list() {
    let dir = TempDir::new().unwrap();
    dfl(&dir).arg("init").assert().success();

    stdout_json(
        &dir,
        &[
            "appearance",
            "set",
            "Trumpet",
            "rgba(255, 0, 0, 1)",
            "rgba(0, 0, 0, 1)",
        ],
    );
    let list = stdout_json(&dir, &["appearance", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["fill_color"], "rgba(255, 0, 0, 1)");
}
