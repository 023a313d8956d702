//! Integration tests for the command-line interface
//!
//! Runs the built binary for the apply and select commands

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const MODEL: &str = r#"model Motor
  EMF EM(k=1);
  Inertia load(J=0.5);
equation
  connect(EM.flange, load.flange_a);
end Motor;
"#;

const CONFIG: &str = r#"[meta]
name = "motor-tuning"

[[transforms]]
id = "em-k"
selector = { type = "component-arg", component = "EM", argument = "k" }
edit = { type = "replace", text = "8" }
"#;

/// Helper to create a directory with a model and a transform file
fn setup_test_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Motor.mo"), MODEL).unwrap();
    fs::write(dir.path().join("tuning.toml"), CONFIG).unwrap();
    dir
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modelica-transformer"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn path_arg(dir: &TempDir, name: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    path.to_str().unwrap().to_string()
}

#[test]
fn apply_help() {
    let output = run(&["apply", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Apply a transform file"));
}

#[test]
fn apply_prints_transformed_file() {
    let dir = setup_test_dir();
    let output = run(&[
        "apply",
        "--config",
        &path_arg(&dir, "tuning.toml"),
        &path_arg(&dir, "Motor.mo"),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, MODEL.replace("EM(k=1)", "EM(k=8)"));
    // Nothing written without --write
    assert_eq!(
        fs::read_to_string(dir.path().join("Motor.mo")).unwrap(),
        MODEL
    );
}

#[test]
fn apply_write_and_summary() {
    let dir = setup_test_dir();
    let output = run(&[
        "apply",
        "--config",
        &path_arg(&dir, "tuning.toml"),
        dir.path().to_str().unwrap(),
        "--write",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Transformed"));
    assert!(stdout.contains("Summary:"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Motor.mo")).unwrap(),
        MODEL.replace("EM(k=1)", "EM(k=8)")
    );
}

#[test]
fn apply_with_diff() {
    let dir = setup_test_dir();
    let output = run(&[
        "apply",
        "--config",
        &path_arg(&dir, "tuning.toml"),
        &path_arg(&dir, "Motor.mo"),
        "--diff",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-  EMF EM(k=1);"));
    assert!(stdout.contains("+  EMF EM(k=8);"));
}

#[test]
fn apply_reports_failures() {
    let dir = setup_test_dir();
    fs::write(dir.path().join("Broken.mo"), "model Broken Real x end Broken;").unwrap();

    let output = run(&[
        "apply",
        "--config",
        &path_arg(&dir, "tuning.toml"),
        dir.path().to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Broken.mo"));
}

#[test]
fn apply_invalid_config() {
    let dir = setup_test_dir();
    fs::write(dir.path().join("empty.toml"), "[meta]\nname = \"empty\"\n").unwrap();

    let output = run(&[
        "apply",
        "--config",
        &path_arg(&dir, "empty.toml"),
        &path_arg(&dir, "Motor.mo"),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("contains no transforms"));
}

#[test]
fn select_table() {
    let dir = setup_test_dir();
    let output = run(&[
        "select",
        &path_arg(&dir, "Motor.mo"),
        "declaration[IDENT=EM]",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Selector: declaration[IDENT=EM]");
    assert_eq!(lines[1], "[1] declaration");
    assert_eq!(lines[2], "    IDENT | modification");
    assert_eq!(lines[3], "    EM    | (k=1)");
}

#[test]
fn select_json() {
    let dir = setup_test_dir();
    let output = run(&[
        "select",
        &path_arg(&dir, "Motor.mo"),
        "connect_clause",
        "--json",
    ]);

    assert!(output.status.success());
    let matches: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(matches[0]["rule"], "connect_clause");
    assert_eq!(matches[0]["text"], "connect(EM.flange, load.flange_a)");
}

#[test]
fn select_bad_path() {
    let dir = setup_test_dir();
    let output = run(&["select", &path_arg(&dir, "Motor.mo"), "declaration[IDENT=EM"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unclosed '['"));
}
