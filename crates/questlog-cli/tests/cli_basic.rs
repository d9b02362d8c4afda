//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temp snapshot file
//! and verify JSON outputs.

use std::path::PathBuf;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "questlog-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Write a snapshot fixture and return its path.
fn fixture(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("questlog-cli-test-{name}.json"));
    std::fs::write(&path, json).expect("Failed to write fixture");
    path
}

const SNAPSHOT: &str = r#"[
    {
        "id": "t1",
        "title": "Write report",
        "priority": 3,
        "status": "pending",
        "start_date": "2024-06-01T00:00:00Z",
        "end_date": "2024-06-03T00:00:00Z"
    },
    {
        "id": "t2",
        "title": "Water plants",
        "priority": 2,
        "status": "done",
        "end_date": "2024-06-10T00:00:00Z",
        "points": 4,
        "is_cyclic": true,
        "cycle": { "frequency": "weekly", "occurrences_count": 2 }
    }
]"#;

const NOW: &str = "2024-06-15T12:00:00Z";

#[test]
fn test_calendar_outputs_partitioned_set() {
    let path = fixture("calendar", SNAPSHOT);
    let (stdout, _, code) = run_cli(&["calendar", "--tasks", path.to_str().unwrap(), "--now", NOW]);
    assert_eq!(code, 0, "calendar failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("calendar output is JSON");
    // Overdue main + two generated weekly occurrences.
    assert_eq!(parsed["active"].as_array().unwrap().len(), 3);
    // Done main.
    assert_eq!(parsed["done"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["done"][0]["occurrence_id"], "t2");
}

#[test]
fn test_list_filters_by_status() {
    let path = fixture("list", SNAPSHOT);
    let (stdout, _, code) = run_cli(&[
        "list",
        "--tasks",
        path.to_str().unwrap(),
        "--now",
        NOW,
        "--status",
        "overdue",
    ]);
    assert_eq!(code, 0, "list failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list output is JSON");
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["occurrence_id"], "t1");
    assert_eq!(entries[0]["effective_status"], "overdue");
}

#[test]
fn test_list_search_is_case_insensitive() {
    let path = fixture("search", SNAPSHOT);
    let (stdout, _, code) = run_cli(&[
        "list",
        "--tasks",
        path.to_str().unwrap(),
        "--now",
        NOW,
        "--search",
        "REPORT",
    ]);
    assert_eq!(code, 0, "list search failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_report_outputs_stats() {
    let path = fixture("report", SNAPSHOT);
    let (stdout, _, code) = run_cli(&["report", "--tasks", path.to_str().unwrap(), "--now", NOW]);
    assert_eq!(code, 0, "report failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("report output is JSON");
    assert_eq!(parsed["total_tasks_completed"], 1);
    assert_eq!(parsed["this_month_points"], 4);
    assert_eq!(parsed["week_series"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["six_week_points_series"].as_array().unwrap().len(), 6);
}

#[test]
fn test_validate_rejects_bad_snapshot() {
    let bad = r#"[
        {
            "id": "bad1",
            "title": "No cycle spec",
            "priority": 5,
            "end_date": "2024-06-10T00:00:00Z",
            "is_cyclic": true
        }
    ]"#;
    let path = fixture("validate-bad", bad);
    let (stdout, _, code) = run_cli(&["validate", "--tasks", path.to_str().unwrap()]);
    assert_eq!(code, 1, "validate should fail");
    assert!(stdout.contains("bad1"));
}

#[test]
fn test_validate_accepts_good_snapshot() {
    let path = fixture("validate-good", SNAPSHOT);
    let (stdout, _, code) = run_cli(&["validate", "--tasks", path.to_str().unwrap()]);
    assert_eq!(code, 0, "validate failed");
    assert!(stdout.contains("2 tasks OK"));
}

#[test]
fn test_missing_file_reports_error() {
    let (_, stderr, code) = run_cli(&["calendar", "--tasks", "/nonexistent/tasks.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}
