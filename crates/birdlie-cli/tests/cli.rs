use assert_cmd::Command;
use predicates::prelude::*;

const SNAPSHOT: &str = r#"{
    "code": "K7Q2",
    "members": ["Ana", "Ben"],
    "calendar": {
        "Ana": {
            "days": [{"monthIndex": 3, "day": 5, "status": "free", "user": "Ana"}],
            "notes": [{"monthIndex": 3, "day": 5, "text": "Zug um 8", "timestamp": "01.03.2025, 10:00", "user": "Ana"}]
        },
        "Ben": {
            "days": [{"monthIndex": 3, "day": 6, "status": "partial", "user": "Ben"}]
        }
    },
    "displayNames": {"Ben": "Benedikt"}
}"#;

fn birdlie() -> Command {
    let mut cmd = Command::cargo_bin("birdlie").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ── stats ───────────────────────────────────────────────────────────────────

#[test]
fn test_stats_text() {
    birdlie()
        .args(["stats", "--start-month", "3", "--start-year", "2025"])
        .write_stdin(SNAPSHOT)
        .assert()
        .success()
        .stdout(predicate::str::contains("April 2025"))
        .stdout(predicate::str::contains("05.04  50% *  free: Ana"))
        .stdout(predicate::str::contains("06.04  50% *  partial: Benedikt"))
        .stdout(predicate::str::contains("Zug um 8"));
}

#[test]
fn test_stats_json() {
    let output = birdlie()
        .args([
            "stats",
            "--start-month",
            "3",
            "--start-year",
            "2025",
            "--format",
            "json",
        ])
        .write_stdin(SNAPSHOT)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let day5 = &json[0]["stats"][4];
    assert_eq!(json[0]["month"], "April");
    assert_eq!(day5["date"], "05.04");
    assert_eq!(day5["freeMembers"], serde_json::json!(["Ana"]));
    assert_eq!(day5["votedPercentage"], 50);
    assert_eq!(day5["isHighlighted"], true);
}

#[test]
fn test_stats_two_month_label() {
    birdlie()
        .args([
            "stats",
            "--start-month",
            "11",
            "--start-year",
            "2025",
            "--duration",
            "2 Monate",
            "--locale",
            "en",
        ])
        .write_stdin(SNAPSHOT)
        .assert()
        .success()
        .stdout(predicate::str::contains("December 2025"))
        .stdout(predicate::str::contains("January 2026"));
}

// ── best-days ───────────────────────────────────────────────────────────────

#[test]
fn test_best_days_text() {
    birdlie()
        .args(["best-days", "--start-month", "3", "--start-year", "2025", "--duration", "2"])
        .write_stdin(SNAPSHOT)
        .assert()
        .success()
        .stdout("April 2025: 5 (1 free)\nMai 2025: no consensus\n");
}

// ── grid / span ─────────────────────────────────────────────────────────────

#[test]
fn test_grid_json() {
    let output = birdlie()
        .args(["grid", "--month", "5", "--year", "2025", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // 1 June 2025 is a Sunday
    assert_eq!(json["weeks"][0][6], 1);
    assert_eq!(json["weeks"][0][0], serde_json::Value::Null);
}

#[test]
fn test_span_text() {
    birdlie()
        .args(["span", "--start-month", "11", "--start-year", "2023", "--duration", "2"])
        .assert()
        .success()
        .stdout("Dezember 2023 (31 days)\nJanuar 2024 (31 days)\n");
}

#[test]
fn test_span_accepts_month_name() {
    birdlie()
        .args(["span", "--start-month", "Dezember", "--start-year", "2023", "--duration", "2"])
        .assert()
        .success()
        .stdout("Dezember 2023 (31 days)\nJanuar 2024 (31 days)\n");
}

#[test]
fn test_unknown_month_name_rejected() {
    birdlie()
        .args(["grid", "--month", "Smarch", "--year", "2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown month 'Smarch'"));
}

// ── errors ──────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_duration_rejected() {
    birdlie()
        .args(["span", "--start-month", "3", "--start-year", "2025", "--duration", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid span duration"));
}

#[test]
fn test_invalid_month_rejected() {
    birdlie()
        .args(["grid", "--month", "12", "--year", "2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}

#[test]
fn test_malformed_snapshot_rejected() {
    birdlie()
        .args(["stats", "--start-month", "3", "--start-year", "2025"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse group snapshot"));
}

#[test]
fn test_duplicate_members_rejected() {
    birdlie()
        .args(["best-days", "--start-month", "3", "--start-year", "2025"])
        .write_stdin(r#"{"members": ["Ana", "Ana"]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate member: Ana"));
}
