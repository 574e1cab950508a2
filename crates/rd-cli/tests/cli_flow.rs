//! Drives the `rdy` binary against a throwaway project directory.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn rdy(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rdy"));
    cmd.arg("--project")
        .arg(root)
        .args(["--format", "raw", "--quiet"])
        .env_remove("READINESS_ACTOR")
        .env_remove("READINESS_DATABASE__PATH");
    cmd
}

fn json(root: &Path, args: &[&str]) -> Value {
    let assert = rdy(root).args(args).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON")
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("id").to_string()
}

fn project_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(".readiness")).unwrap();
    dir
}

#[test]
fn help_lists_workflow_commands() {
    Command::new(env!("CARGO_BIN_EXE_rdy"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report").and(predicate::str::contains("assign")));
}

#[test]
fn gate_opens_after_last_task_completes() {
    let dir = project_root();
    let root = dir.path();

    let project = json(root, &["project", "create", "--name", "Export 2025"]);
    let sp = json(root, &["sub-project", "create", &id_of(&project), "--name", "Germany"]);
    let sp_id = id_of(&sp);
    let company = json(root, &["company", "register", "--name", "Acme Exports"]);
    let company_id = id_of(&company);

    let assigned = json(root, &["assign", "add", &sp_id, "--company", &company_id]);
    assert_eq!(assigned.as_array().map(Vec::len), Some(1));

    let task = json(root, &["task", "create", &sp_id, "--title", "Pricing review"]);
    let task_id = id_of(&task);

    let gate = json(root, &["report", "eligible", &sp_id, &company_id]);
    assert_eq!(gate["eligible"], false);

    let mut create = vec!["report", "create", sp_id.as_str(), company_id.as_str()];
    create.extend_from_slice(&[
        "--overall", "5", "--quality", "4", "--timeliness", "4", "--communication", "5",
    ]);

    rdy(root)
        .args(&create)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rdy error"));

    json(root, &["task", "transition", &task_id, "--status", "in-review"]);
    json(root, &["task", "transition", &task_id, "--status", "completed"]);

    let progress = json(root, &["assign", "progress", &sp_id, &company_id]);
    assert_eq!(progress["percentage"], 100);

    let report = json(root, &create);
    assert_eq!(report["overall_rating"], 5);
    assert_eq!(report["created_by"], "system");

    rdy(root).args(&create).assert().failure();
}

#[test]
fn actor_flag_is_recorded_in_audit_trail() {
    let dir = project_root();
    let root = dir.path();

    json(root, &["--actor", "usr-consultant", "company", "register", "--name", "Fjord AS"]);

    let entries = json(root, &["audit", "--entity-type", "company", "--by", "usr-consultant"]);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "created");
}

#[test]
fn unknown_status_is_rejected() {
    let dir = project_root();
    let root = dir.path();
    let project = json(root, &["project", "create", "--name", "P"]);

    rdy(root)
        .args(["project", "transition", &id_of(&project), "--status", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status 'done'"));
}
