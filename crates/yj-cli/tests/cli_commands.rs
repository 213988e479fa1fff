//! Integration tests for the `yj` command-line interface.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn yj() -> Command {
    let mut cmd = Command::cargo_bin("yj").unwrap();
    for var in ["GEMINI_API_KEY", "API_KEY", "YJ_MODEL", "YJ_CACHE", "YJ_HISTORY"] {
        cmd.env_remove(var);
    }
    cmd
}

/// An offline, instant cast that keeps its files inside `dir`.
fn cast(dir: &Path, question: &str, seed: u64) -> Command {
    let mut cmd = yj();
    cmd.args(["cast", question, "--offline", "--delay", "0"])
        .args(["--seed", &seed.to_string()])
        .arg("--cache")
        .arg(dir.join("cache.json"))
        .arg("--history")
        .arg(dir.join("history.json"));
    cmd
}

fn cast_json(dir: &Path, question: &str, seed: u64) -> serde_json::Value {
    let output = cast(dir, question, seed).arg("--json").output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_all_hexagrams() {
    yj().arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("乾"))
        .stdout(predicate::str::contains("未济"))
        .stdout(predicate::str::contains("64 hexagrams"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_authored_hexagram() {
    yj().args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 乾"))
        .stdout(predicate::str::contains("潜龙，勿用。"));
}

#[test]
fn show_placeholder_hexagram() {
    yj().args(["show", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#64 未济"))
        .stdout(predicate::str::contains("（暂无爻辞数据，请补充）"));
}

#[test]
fn show_out_of_range() {
    yj().args(["show", "65"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ---------------------------------------------------------------------------
// cast
// ---------------------------------------------------------------------------

#[test]
fn cast_offline_prints_fallback_reading() {
    let dir = TempDir::new().unwrap();
    cast(dir.path(), "近期事业发展", 42)
        .assert()
        .success()
        .stdout(predicate::str::contains("近期事业发展"))
        .stdout(predicate::str::contains("初爻"))
        .stdout(predicate::str::contains("上爻"))
        .stdout(predicate::str::contains("本卦"))
        .stdout(predicate::str::contains("时机未到"));
}

#[test]
fn cast_empty_question_fails() {
    let dir = TempDir::new().unwrap();
    cast(dir.path(), "   ", 1)
        .assert()
        .failure()
        .stderr(predicate::str::contains("question is required"));
    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn cast_same_seed_same_hexagram() {
    let dir = TempDir::new().unwrap();
    let a = cast_json(dir.path(), "q", 7);
    let b = cast_json(dir.path(), "q", 7);
    assert_eq!(a["casting"], b["casting"]);
    assert_eq!(a["primary"], b["primary"]);
    assert_eq!(a["relating"], b["relating"]);
    assert_ne!(a["id"], b["id"]);
}

#[test]
fn cast_json_record_is_consistent() {
    let dir = TempDir::new().unwrap();
    let record = cast_json(dir.path(), "q", 3);

    let lines = record["casting"]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 6);
    let primary = record["primary"].as_u64().unwrap();
    assert!((1..=64).contains(&primary));
    assert_eq!(
        record["interpretation"]["concreteStrategy"],
        "时机未到，建议韬光养晦，切勿轻举妄动。"
    );
}

#[test]
fn cast_appends_to_history() {
    let dir = TempDir::new().unwrap();
    cast(dir.path(), "first", 1).assert().success();
    cast(dir.path(), "second", 2).assert().success();

    let content = fs::read_to_string(dir.path().join("history.json")).unwrap();
    let history: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(history["records"].as_array().unwrap().len(), 2);
}

#[test]
fn cast_with_damaged_history_still_reads() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    fs::write(&history, r#"{"records": ["#).unwrap();

    cast(dir.path(), "q", 1)
        .assert()
        .success()
        .stdout(predicate::str::contains("本卦"))
        .stdout(predicate::str::contains("时机未到"))
        .stderr(predicate::str::contains("history unreadable"));

    assert_eq!(fs::read_to_string(&history).unwrap(), r#"{"records": ["#);
}

// ---------------------------------------------------------------------------
// study
// ---------------------------------------------------------------------------

#[test]
fn study_offline_uses_fallback_notes() {
    let dir = TempDir::new().unwrap();
    yj().args(["study", "11", "--offline", "--cache"])
        .arg(dir.path().join("cache.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("#11 泰"))
        .stdout(predicate::str::contains("数据加载中"));
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

#[test]
fn history_markdown_export() {
    let dir = TempDir::new().unwrap();
    cast(dir.path(), "搬家是否顺利", 5).assert().success();

    yj().args(["history", "--history"])
        .arg(dir.path().join("history.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Divination History"))
        .stdout(predicate::str::contains("搬家是否顺利"));
}

#[test]
fn history_text_export_to_file() {
    let dir = TempDir::new().unwrap();
    cast(dir.path(), "q", 5).assert().success();
    let out = dir.path().join("history.txt");

    yj().args(["history", "--format", "text", "--history"])
        .arg(dir.path().join("history.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 readings"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Divination History"));
}

#[test]
fn history_empty_when_missing() {
    let dir = TempDir::new().unwrap();
    yj().args(["history", "--history"])
        .arg(dir.path().join("none.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Divination History"));
}

#[test]
fn history_unknown_format() {
    let dir = TempDir::new().unwrap();
    yj().args(["history", "--format", "xml", "--history"])
        .arg(dir.path().join("history.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format"));
}
