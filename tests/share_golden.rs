//! Golden file tests for share-text export
//!
//! The `daily share` output is handed verbatim to share targets, so its
//! exact layout is a contract: header line, starred priority section,
//! unlabeled regular section, completed section, `• ` bullets.

use serde_json::Value;
use tempfile::TempDir;

/// Get a command instance for the daily binary
fn daily_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("daily"));
    cmd.arg("--dir").arg(dir.path());
    cmd
}

fn add_task(dir: &TempDir, list: &str, text: &str) -> String {
    let output = daily_cmd(dir)
        .args(["task", "add", list, text, "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

/// The canonical three-section list from the docs: one priority task,
/// one regular task, one completed task
fn setup_groceries(dir: &TempDir) {
    daily_cmd(dir)
        .args(["list", "add", "Groceries"])
        .assert()
        .success();

    let milk = add_task(dir, "Groceries", "Milk");
    add_task(dir, "Groceries", "Bread");
    let eggs = add_task(dir, "Groceries", "Eggs");

    daily_cmd(dir).args(["task", "flag", &milk]).assert().success();
    daily_cmd(dir).args(["task", "done", &eggs]).assert().success();
}

#[test]
fn test_share_full_layout() {
    let dir = TempDir::new().unwrap();
    setup_groceries(&dir);

    daily_cmd(&dir)
        .args(["share", "Groceries"])
        .assert()
        .success()
        .stdout("Groceries:\nPRIORITY TASKS ⭐️:\n• Milk\n\n• Bread\n\nCOMPLETED ✅ :\n• Eggs\n");
}

#[test]
fn test_share_regular_tasks_only() {
    let dir = TempDir::new().unwrap();
    daily_cmd(&dir)
        .args(["list", "add", "Errands"])
        .assert()
        .success();
    add_task(&dir, "Errands", "Post office");
    add_task(&dir, "Errands", "Dry cleaning");

    daily_cmd(&dir)
        .args(["share", "Errands"])
        .assert()
        .success()
        .stdout("Errands:\n• Post office\n• Dry cleaning\n\n");
}

#[test]
fn test_share_empty_list_is_header_only() {
    let dir = TempDir::new().unwrap();
    daily_cmd(&dir)
        .args(["list", "add", "Empty"])
        .assert()
        .success();

    daily_cmd(&dir)
        .args(["share", "Empty"])
        .assert()
        .success()
        .stdout("Empty:\n");
}

#[test]
fn test_share_excludes_archived_tasks() {
    let dir = TempDir::new().unwrap();
    daily_cmd(&dir)
        .args(["list", "add", "Groceries"])
        .assert()
        .success();
    add_task(&dir, "Groceries", "Milk");
    let old = add_task(&dir, "Groceries", "Old entry");

    daily_cmd(&dir).args(["task", "archive", &old]).assert().success();

    daily_cmd(&dir)
        .args(["share", "Groceries"])
        .assert()
        .success()
        .stdout("Groceries:\n• Milk\n\n");
}

#[test]
fn test_share_orders_sections_by_list_order() {
    let dir = TempDir::new().unwrap();
    daily_cmd(&dir)
        .args(["list", "add", "Trip"])
        .assert()
        .success();

    // Created after "Tent" but flagged, so it leads the priority section
    add_task(&dir, "Trip", "Tent");
    let passport = add_task(&dir, "Trip", "Passport");
    let stove = add_task(&dir, "Trip", "Stove");
    daily_cmd(&dir).args(["task", "flag", &passport]).assert().success();
    daily_cmd(&dir).args(["task", "flag", &stove]).assert().success();

    daily_cmd(&dir)
        .args(["share", "Trip"])
        .assert()
        .success()
        .stdout("Trip:\nPRIORITY TASKS ⭐️:\n• Passport\n• Stove\n\n• Tent\n\n");
}

#[test]
fn test_share_json_carries_the_same_text() {
    let dir = TempDir::new().unwrap();
    setup_groceries(&dir);

    let output = daily_cmd(&dir)
        .args(["share", "Groceries", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["list"], "Groceries");
    assert_eq!(
        json["text"],
        "Groceries:\nPRIORITY TASKS ⭐️:\n• Milk\n\n• Bread\n\nCOMPLETED ✅ :\n• Eggs\n"
    );
}
