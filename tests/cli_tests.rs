use assert_cmd::Command;
use cppp::{cli::CommandLineConfig, strategy::StrategyKind};
use std::path::{Path, PathBuf};

fn write_matrix(dir: &Path, rows: &str) -> PathBuf {
    let path = dir.join("matrix.json");
    std::fs::write(&path, rows).expect("matrix");
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_exits_with_success_on_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cppp"));
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_unknown_flag_is_config_error() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cppp"));
    cmd.arg("--bogus");
    cmd.assert().code(2);
}

#[test]
fn test_cli_search_solves_matrix() {
    let dir = tempfile::tempdir().expect("tempdir");
    let matrix = write_matrix(dir.path(), "[[1, 0], [1, 1], [0, 1]]");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cppp"));
    cmd.args(["search", "--matrix", matrix.to_str().unwrap()]);
    let stdout = stdout_of(&mut cmd);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(
        report["outcome"]["solved"]["realized"],
        serde_json::json!([0, 1, 0])
    );
}

#[test]
fn test_cli_build_then_realize() {
    let dir = tempfile::tempdir().expect("tempdir");
    let matrix = write_matrix(dir.path(), "[[1, 0], [1, 1], [0, 1]]");
    let state = dir.path().join("state.json");
    let next = dir.path().join("next.json");

    let mut build = Command::new(env!("CARGO_BIN_EXE_cppp"));
    build.args([
        "build",
        "--matrix",
        matrix.to_str().unwrap(),
        "--output",
        state.to_str().unwrap(),
    ]);
    assert!(stdout_of(&mut build).contains("species=3 characters=2 conflicts=0"));

    let mut realize = Command::new(env!("CARGO_BIN_EXE_cppp"));
    realize.args([
        "--command",
        "realize",
        "--state",
        state.to_str().unwrap(),
        "--character",
        "0",
        "--output",
        next.to_str().unwrap(),
    ]);
    assert!(stdout_of(&mut realize).contains("outcome=BecameRed"));
    assert!(next.exists());

    let mut check = Command::new(env!("CARGO_BIN_EXE_cppp"));
    check.args(["check", "--state", next.to_str().unwrap()]);
    assert!(stdout_of(&mut check).contains("\"num_species\": 2"));
}

#[test]
fn test_cli_missing_matrix_fails() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cppp"));
    cmd.args(["search"]);
    cmd.assert().code(1);
}

#[test]
fn test_config_parses_search_flags() {
    let config = CommandLineConfig::from_args(&[
        "cppp",
        "search",
        "--matrix",
        "m.json",
        "--strategy",
        "shuffled",
        "--seed",
        "9",
        "--max-depth",
        "4",
    ])
    .expect("config");
    assert_eq!(config.command, "search");
    assert_eq!(config.matrix, Some(PathBuf::from("m.json")));
    assert_eq!(config.search.strategy, StrategyKind::Shuffled { seed: 9 });
    assert_eq!(config.search.max_depth, Some(4));
}

#[test]
fn test_config_rejects_bad_values() {
    assert!(CommandLineConfig::from_args(&["cppp", "--character"]).is_err());
    assert!(CommandLineConfig::from_args(&["cppp", "--character", "x"]).is_err());
    assert!(CommandLineConfig::from_args(&["cppp", "--strategy", "greedy"]).is_err());
}

#[test]
fn test_config_reads_flag_values_from_owned_args() {
    let args: Vec<String> = [
        "cppp",
        "--command",
        "realize",
        "--state",
        "s.json",
        "--character",
        "3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = CommandLineConfig::from_args(&refs).expect("config");
    assert_eq!(config.command, "realize");
    assert_eq!(config.state, Some(PathBuf::from("s.json")));
    assert_eq!(config.character, Some(3));
}
