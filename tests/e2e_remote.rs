//! E2E tests for remote selection through `lab remote` and `lab browse --print`.

mod common;

use common::cli::{LabWorkspace, extract_json_payload, run_lab, run_lab_with_env};
use predicates::prelude::*;
use serde_json::Value;

fn parse_json(text: &str) -> Value {
    serde_json::from_str(&extract_json_payload(text)).expect("parse json")
}

#[test]
fn e2e_remote_prefers_matching_host() {
    let _log = common::test_log("e2e_remote_prefers_matching_host");
    let workspace = LabWorkspace::with_remotes(&[
        ("github", "git@github.com:me/project.git"),
        ("lab", "git@gitlab.com:group/sub/project.git"),
    ]);

    let run = run_lab(&workspace, ["remote", "--json"], "remote_json");
    assert!(run.status.success(), "remote failed: {}", run.stderr);
    let json = parse_json(&run.stdout);
    assert_eq!(json["host"], "gitlab.com");
    assert_eq!(json["namespace"], "group/sub");
    assert_eq!(json["repository"], "project");
    assert_eq!(json["repository_url"], "https://gitlab.com/group/sub/project");
    assert_eq!(json["api_base_url"], "https://gitlab.com/api/v4");
    assert_eq!(
        json["merge_requests_url"],
        "https://gitlab.com/group/sub/project/merge_requests"
    );
}

#[test]
fn e2e_remote_plain_output() {
    let _log = common::test_log("e2e_remote_plain_output");
    let workspace = LabWorkspace::with_remotes(&[("origin", "https://gitlab.com/group/project.git")]);

    workspace
        .command()
        .arg("remote")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab.com/group/project"))
        .stdout(predicate::str::contains(
            "Issues: https://gitlab.com/group/project/issues",
        ));
}

#[test]
fn e2e_origin_breaks_ties() {
    let _log = common::test_log("e2e_origin_breaks_ties");
    let workspace = LabWorkspace::with_remotes(&[
        ("upstream", "git@gitlab.com:team/project.git"),
        ("origin", "ssh://git@gitlab.com:22/me/project.git"),
    ]);

    let run = run_lab(&workspace, ["browse", "--print"], "browse_origin");
    assert!(run.status.success(), "browse failed: {}", run.stderr);
    assert_eq!(run.stdout.trim(), "https://gitlab.com/me/project");
}

#[test]
fn e2e_ambiguous_remotes_fail_with_candidates() {
    let _log = common::test_log("e2e_ambiguous_remotes_fail_with_candidates");
    let workspace = LabWorkspace::with_remotes(&[
        ("upstream", "git@gitlab.com:team/project.git"),
        ("fork", "https://gitlab.com/me/project"),
    ]);

    let run = run_lab(&workspace, ["remote", "--json"], "remote_ambiguous");
    assert_eq!(run.status.code(), Some(3));
    let json = parse_json(&run.stderr);
    assert_eq!(json["error"]["code"], "AMBIGUOUS_REMOTE");
    let names: Vec<_> = json["error"]["context"]["candidates"]
        .as_array()
        .expect("candidates")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["upstream", "fork"]);
}

#[test]
fn e2e_no_matching_remote() {
    let _log = common::test_log("e2e_no_matching_remote");
    let workspace = LabWorkspace::with_remotes(&[("origin", "git@github.com:me/project.git")]);

    let run = run_lab(&workspace, ["remote", "--json"], "remote_no_match");
    assert_eq!(run.status.code(), Some(3));
    let json = parse_json(&run.stderr);
    assert_eq!(json["error"]["code"], "NO_MATCHING_REMOTE");
    assert_eq!(json["error"]["context"]["host"], "gitlab.com");
    assert_eq!(json["error"]["context"]["remotes"][0], "origin");
}

#[test]
fn e2e_repository_without_remotes_has_no_match() {
    let _log = common::test_log("e2e_repository_without_remotes_has_no_match");
    let workspace = LabWorkspace::new();

    let run = run_lab(&workspace, ["remote"], "remote_none");
    assert_eq!(run.status.code(), Some(3));
    assert!(run.stderr.contains("NO_MATCHING_REMOTE"), "{}", run.stderr);
}

#[test]
fn e2e_lone_unparsable_remote_reports_parse_error() {
    let _log = common::test_log("e2e_lone_unparsable_remote_reports_parse_error");
    let workspace = LabWorkspace::with_remotes(&[("origin", "/srv/git/project.git")]);

    let run = run_lab(&workspace, ["remote", "--json"], "remote_parse_error");
    assert_eq!(run.status.code(), Some(3));
    let json = parse_json(&run.stderr);
    assert_eq!(json["error"]["code"], "REMOTE_PARSE_ERROR");
    assert_eq!(json["error"]["context"]["raw_url"], "/srv/git/project.git");
}

#[test]
fn e2e_host_override_from_flag_and_env() {
    let _log = common::test_log("e2e_host_override_from_flag_and_env");
    let workspace = LabWorkspace::with_remotes(&[
        ("origin", "git@gitlab.com:group/project.git"),
        ("work", "git@git.example.com:team/service.git"),
    ]);

    let flag = run_lab(
        &workspace,
        ["browse", "--print", "--host", "git.example.com"],
        "browse_host_flag",
    );
    assert!(flag.status.success(), "browse failed: {}", flag.stderr);
    assert_eq!(flag.stdout.trim(), "https://git.example.com/team/service");

    let env = run_lab_with_env(
        &workspace,
        ["browse", "--print"],
        [("LAB_HOST", "git.example.com")],
        "browse_host_env",
    );
    assert!(env.status.success(), "browse failed: {}", env.stderr);
    assert_eq!(env.stdout.trim(), "https://git.example.com/team/service");
}

#[test]
fn e2e_remote_all_lists_every_candidate() {
    let _log = common::test_log("e2e_remote_all_lists_every_candidate");
    let workspace = LabWorkspace::with_remotes(&[
        ("origin", "git@gitlab.com:group/project.git"),
        ("local", "/srv/git/project.git"),
    ]);

    let run = run_lab(&workspace, ["remote", "--all", "--json"], "remote_all");
    assert!(run.status.success(), "remote --all failed: {}", run.stderr);
    let json = parse_json(&run.stdout);
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "origin");
    assert_eq!(rows[0]["matches_host"], true);
    assert_eq!(rows[1]["address"], Value::Null);
    assert_eq!(rows[1]["matches_host"], false);
}

#[test]
fn e2e_outside_repository_fails() {
    let _log = common::test_log("e2e_outside_repository_fails");
    let workspace = LabWorkspace::bare_dir();

    let run = run_lab(&workspace, ["remote", "--json"], "remote_outside_repo");
    assert_eq!(run.status.code(), Some(2));
    let json = parse_json(&run.stderr);
    assert_eq!(json["error"]["code"], "NOT_A_REPOSITORY");
}
