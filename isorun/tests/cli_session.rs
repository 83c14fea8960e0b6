//! CLI tests for `isorun run` and `isorun init`.
//!
//! Spawns the isorun binary and verifies exit codes, the temp-home locator
//! line, and home preservation across runner outcomes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;

use isorun::exit_codes;
use isorun::test_support::{RUNNER_REL, ScriptedProject};

fn run_isorun(project_root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_isorun"))
        .current_dir(project_root)
        .args(["run", "--runner", RUNNER_REL, "--interpreter", "/bin/sh"])
        .args(extra)
        .output()
        .expect("run isorun")
}

fn temp_home_line(output: &Output) -> PathBuf {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|l| l.starts_with("Test home: "))
        .unwrap_or_else(|| panic!("missing temp home line in stdout: {stdout}"));
    PathBuf::from(line.trim_start_matches("Test home: "))
}

#[test]
fn run_success_releases_home_and_exits_ok() {
    let project = ScriptedProject::new(0).expect("project");

    let output = run_isorun(project.root(), &[]);
    assert_eq!(
        output.status.code(),
        Some(exit_codes::OK),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let home = temp_home_line(&output);
    assert!(!home.exists(), "home should be removed after success");
}

#[test]
fn run_failure_exits_one_and_preserves_home() {
    let project = ScriptedProject::new(3).expect("project");

    let output = run_isorun(project.root(), &[]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));

    let home = temp_home_line(&output);
    assert!(home.is_dir(), "home should survive a failed run");
    for sub in [".config", ".cache"] {
        assert!(home.join(sub).is_dir(), "missing {sub} in preserved home");
    }

    fs::remove_dir_all(&home).expect("cleanup preserved home");
}

#[test]
fn run_forwards_args_in_order() {
    let project = ScriptedProject::new(0).expect("project");

    let output = run_isorun(project.root(), &["one", "--two", "three"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let lines = project.record_lines().expect("record");
    let args: Vec<&str> = lines.iter().filter_map(|l| l.strip_prefix("arg=")).collect();
    assert_eq!(args, vec!["one", "--two", "three"]);
}

#[test]
fn run_json_reports_outcome() {
    let project = ScriptedProject::new(2).expect("project");

    let output = run_isorun(project.root(), &["--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_line = stdout
        .lines()
        .find(|l| l.starts_with('{'))
        .expect("json report line");
    let report: serde_json::Value = serde_json::from_str(json_line).expect("parse report");
    assert_eq!(report["exit_code"], 1);
    assert_eq!(report["passed"], false);
    assert_eq!(report["home_preserved"], true);

    let home = PathBuf::from(report["home_path"].as_str().expect("home_path"));
    assert!(home.is_dir());
    fs::remove_dir_all(&home).expect("cleanup preserved home");
}

#[test]
fn concurrent_runs_use_distinct_homes() {
    let project = ScriptedProject::new(1).expect("project");
    let root = project.root().to_path_buf();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let root = root.clone();
            thread::spawn(move || run_isorun(&root, &[]))
        })
        .collect();
    let outputs: Vec<Output> = handles
        .into_iter()
        .map(|h| h.join().expect("join run thread"))
        .collect();

    let homes: Vec<PathBuf> = outputs.iter().map(temp_home_line).collect();
    assert_ne!(homes[0], homes[1], "concurrent sessions must not collide");
    for home in &homes {
        assert!(home.is_dir());
        fs::remove_dir_all(home).expect("cleanup preserved home");
    }
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let temp = tempfile::tempdir().expect("tempdir");

    let status = Command::new(env!("CARGO_BIN_EXE_isorun"))
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("isorun init");
    assert_eq!(status.code(), Some(exit_codes::OK));

    let config = fs::read_to_string(temp.path().join("isorun.toml")).expect("read config");
    assert!(config.contains("runner = \"tests/runner.py\""));
    assert!(config.contains("interpreter = \"python3\""));

    let second = Command::new(env!("CARGO_BIN_EXE_isorun"))
        .current_dir(temp.path())
        .arg("init")
        .output()
        .expect("isorun init again");
    assert_eq!(second.status.code(), Some(exit_codes::FAILED));
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = Command::new(env!("CARGO_BIN_EXE_isorun"))
        .current_dir(temp.path())
        .args(["init", "--force"])
        .status()
        .expect("isorun init --force");
    assert_eq!(forced.code(), Some(exit_codes::OK));
}
