//! Basic CLI E2E tests.
//!
//! Each test points the binary at its own data directory via
//! POMODORO_PRO_HOME and checks stdout/stderr and exit codes.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;
use pomodoro_pro_core::{Database, STATS_KEY};
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomodoro-pro").unwrap();
    cmd.env("POMODORO_PRO_HOME", home.path())
        .env_remove("POMODORO_PRO_ENV")
        .env_remove("POMODORO_PRO_LOG");
    cmd
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("stdout line is JSON"))
        .collect()
}

#[test]
fn test_config_get_default() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "get", "timer.focus_duration_secs"])
        .assert()
        .success()
        .stdout("1500\n");
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "notifications.bell", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
    cli(&home)
        .args(["config", "get", "notifications.bell"])
        .assert()
        .success()
        .stdout("false\n");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_zero_duration() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "timer.break_duration_secs", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_config_unknown_key() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "get", "timer.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let home = TempDir::new().unwrap();
    let out = cli(&home).args(["config", "list"]).output().unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["timer"]["long_break_every"], 4);
    assert_eq!(json["storage"]["autosave_interval_secs"], 30);
}

#[test]
fn test_stats_show_fresh_day() {
    let home = TempDir::new().unwrap();
    let out = cli(&home)
        .args(["stats", "show", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["session_count"], 1);
    assert_eq!(json["completed_sessions"], 0);
    assert_eq!(json["streak_count"], 0);
}

#[test]
fn test_stats_show_human() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["stats", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus time: 0h 0m"));
}

#[test]
fn test_stats_reset() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["stats", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stats reset"));
}

#[test]
fn test_run_mode_commands_emit_events() {
    let home = TempDir::new().unwrap();
    let out = cli(&home)
        .args(["run", "--json"])
        .write_stdin("b\nl\nm\nq\n")
        .output()
        .unwrap();
    assert!(out.status.success());

    let events = json_lines(&out.stdout);
    assert_eq!(events[0]["type"], "state_snapshot");
    assert_eq!(events[0]["mode"], "focus");
    assert_eq!(events[0]["remaining_secs"], 1500);

    let modes: Vec<_> = events[1..]
        .iter()
        .map(|e| (e["type"].as_str().unwrap(), e["mode"].as_str().unwrap()))
        .collect();
    assert_eq!(
        modes,
        vec![
            ("mode_changed", "break"),
            ("mode_changed", "longbreak"),
            ("mode_changed", "focus"),
        ]
    );
}

#[test]
fn test_run_toggle_and_reset() {
    let home = TempDir::new().unwrap();
    let out = cli(&home)
        .args(["run", "--json", "--mode", "break"])
        .write_stdin("t\nt\nr\n")
        .output()
        .unwrap();
    assert!(out.status.success());

    let events = json_lines(&out.stdout);
    let types: Vec<_> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["state_snapshot", "timer_started", "timer_paused", "timer_reset"]
    );
    assert_eq!(events[3]["mode"], "break");
    assert_eq!(events[3]["duration_secs"], 300);
    // Reset notice goes to the notification sink on stderr.
    assert!(String::from_utf8_lossy(&out.stderr).contains("Timer reset"));
}

#[test]
fn test_run_uses_configured_durations() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "timer.focus_duration_secs", "600"])
        .assert()
        .success();
    let out = cli(&home)
        .args(["run", "--json"])
        .write_stdin("q\n")
        .output()
        .unwrap();
    let events = json_lines(&out.stdout);
    assert_eq!(events[0]["remaining_secs"], 600);
    assert_eq!(events[0]["total_secs"], 600);
}

fn stored_record(home: &TempDir) -> Option<serde_json::Value> {
    let db = Database::open_at(home.path().join("pomodoro-pro.db")).unwrap();
    db.kv_get(STATS_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[test]
fn test_run_saves_stats_on_exit() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["run", "--json"])
        .write_stdin("q\n")
        .assert()
        .success();

    let record = stored_record(&home).expect("stats record written on quit");
    assert_eq!(record["sessionCount"], 1);
    assert_eq!(record["completedSessions"], 0);
    assert!(record["lastSaveDate"].is_string());
}

#[test]
fn test_run_completes_focus_session_on_ticks() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "timer.focus_duration_secs", "2"])
        .assert()
        .success();

    // Keep stdin open so the loop runs on ticks alone until `q` arrives.
    let mut child = std::process::Command::cargo_bin("pomodoro-pro")
        .unwrap()
        .env("POMODORO_PRO_HOME", home.path())
        .env_remove("POMODORO_PRO_ENV")
        .env_remove("POMODORO_PRO_LOG")
        .args(["run", "--json", "--start"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    std::thread::sleep(Duration::from_secs(4));
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"q\n").unwrap();
    drop(stdin);
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let events = json_lines(&out.stdout);
    let completed: Vec<_> = events
        .iter()
        .filter(|e| e["type"] == "session_completed")
        .collect();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["mode"], "focus");
    assert_eq!(completed[0]["next_mode"], "break");
    assert_eq!(completed[0]["stats"]["completed_sessions"], 1);
    assert!(String::from_utf8_lossy(&out.stderr).contains("Focus session completed!"));

    let out = cli(&home)
        .args(["stats", "show", "--json"])
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(stats["completed_sessions"], 1);
    assert_eq!(stats["session_count"], 2);
    assert_eq!(stats["streak_count"], 1);
    assert_eq!(stats["total_time_spent_secs"], 2);
}

#[test]
fn test_run_rejects_oversized_autosave_interval() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "storage.autosave_interval_secs", "9223372036854775807"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("storage.autosave_interval_secs"));
    std::fs::write(
        home.path().join("config.toml"),
        "[storage]\nautosave_interval_secs = 9223372036854775807\n",
    )
    .unwrap();
    cli(&home)
        .args(["run", "--json"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_run_rejects_unknown_mode() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["run", "--mode", "nap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode"));
}
