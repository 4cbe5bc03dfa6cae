use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studyflow(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studyflow").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn add_and_list_assignment() {
    let dir = TempDir::new().unwrap();

    studyflow(&dir)
        .args(["assignment", "add", "Essay draft", "--due", "2030-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created assignment"));

    studyflow(&dir)
        .args(["assignment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Essay draft"))
        .stdout(predicate::str::contains("1 assignment(s)"));
}

#[test]
fn free_tier_rejects_eleventh_assignment() {
    let dir = TempDir::new().unwrap();

    for i in 0..10 {
        studyflow(&dir)
            .args(["assignment", "add", &format!("Task {}", i), "--due", "2030-01-15"])
            .assert()
            .success();
    }

    studyflow(&dir)
        .args(["assignment", "add", "Overflow", "--due", "2030-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Limit reached (10)"));
}

#[test]
fn plan_is_gated_behind_premium() {
    let dir = TempDir::new().unwrap();

    studyflow(&dir)
        .args(["assignment", "add", "Reading", "--due", "2030-01-15", "--estimated", "100"])
        .assert()
        .success();

    studyflow(&dir)
        .args(["plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("premium"));

    studyflow(&dir)
        .args(["--premium", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/3]"))
        .stdout(predicate::str::contains("Total planned: 100m"));
}

#[test]
fn session_lifecycle() {
    let dir = TempDir::new().unwrap();

    let assert = studyflow(&dir)
        .args(["--format", "json", "session", "start"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let started: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = started["id"].as_str().unwrap().to_string();
    assert_eq!(started["duration_minutes"], 25);

    studyflow(&dir)
        .args(["session", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));

    studyflow(&dir)
        .args(["session", "end", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    studyflow(&dir)
        .args(["session", "end", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already ended"));

    studyflow(&dir)
        .args(["session", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session."));

    studyflow(&dir)
        .args(["session", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 session(s)"));
}

#[test]
fn custom_duration_requires_premium() {
    let dir = TempDir::new().unwrap();

    studyflow(&dir)
        .args(["session", "start", "--duration", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("premium"));

    studyflow(&dir)
        .args(["--premium", "session", "start", "--duration", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(50m)"));
}

#[test]
fn stats_reports_basic_and_premium_blocks() {
    let dir = TempDir::new().unwrap();

    studyflow(&dir)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions:   0"))
        .stdout(predicate::str::contains("Upgrade to premium"));

    studyflow(&dir)
        .args(["--premium", "stats", "--period", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score:"))
        .stdout(predicate::str::contains("Streak:"));
}
