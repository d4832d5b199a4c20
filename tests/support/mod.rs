#![allow(dead_code)]

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::process::Output;
use tempfile::TempDir;

pub const OWNER: &str = "alice";

/// Get a Command for cardmatch with a clean owner environment
pub fn cardmatch() -> Command {
    let mut cmd = cargo_bin_cmd!("cardmatch");
    cmd.env_remove("CARDMATCH_OWNER").env_remove("CARDMATCH_LOG");
    cmd
}

/// A cardmatch command run in `dir` on behalf of [`OWNER`]
pub fn owned(dir: &TempDir) -> Command {
    let mut cmd = cardmatch();
    cmd.current_dir(dir.path()).env("CARDMATCH_OWNER", OWNER);
    cmd
}

/// Parse the id printed on the first stdout line
pub fn extract_id(output: &Output) -> i64 {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .and_then(|line| line.trim().parse().ok())
        .unwrap_or_else(|| panic!("no id in output: {:?}", output))
}

/// Initialise a store in a fresh directory
pub fn setup_store() -> TempDir {
    let dir = TempDir::new().unwrap();
    cardmatch()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

/// Run a command that prints an id and return it
pub fn create(dir: &TempDir, args: &[&str]) -> i64 {
    let output = owned(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    extract_id(&output)
}

/// Store with technologies Rust and SQL, returning their ids
pub fn setup_catalog() -> (TempDir, i64, i64) {
    let dir = setup_store();
    let rust = create(&dir, &["tech", "add", "Rust", "--kind", "language"]);
    let sql = create(&dir, &["tech", "add", "SQL", "--kind", "language"]);
    (dir, rust, sql)
}

/// Project demanding Rust 8, SQL 6 and level 5 on every axis
pub fn create_project(dir: &TempDir, name: &str, rust: i64, sql: i64) -> i64 {
    create(
        dir,
        &[
            "project",
            "create",
            name,
            "--level",
            &format!("{rust}=8"),
            "--level",
            &format!("{sql}=6"),
        ],
    )
}

/// Card covering the whole project on its own
pub fn create_strong_card(dir: &TempDir, name: &str, rust: i64, sql: i64) -> i64 {
    create(
        dir,
        &[
            "card",
            "create",
            name,
            "--level",
            &format!("{rust}=8"),
            "--level",
            &format!("{sql}=6"),
        ],
    )
}

/// Card covering little of anything
pub fn create_weak_card(dir: &TempDir, name: &str, rust: i64) -> i64 {
    create(
        dir,
        &[
            "card",
            "create",
            name,
            "--social",
            "2",
            "--wisdom",
            "2",
            "--speed",
            "2",
            "--level",
            &format!("{rust}=2"),
        ],
    )
}
