//! E2E tests for the `completions` command.
//!
//! Test coverage:
//! - Generate completions for each supported shell
//! - Verify completions contain the subcommand and global flag names
//! - Write to a file with `--output`
//! - Unknown shell is rejected

mod common;

use common::cli::{LabWorkspace, run_lab};
use tracing::info;

fn assert_contains_subcommands(output: &str, shell_name: &str) {
    for cmd in ["browse", "remote", "compose", "config", "version", "completions"] {
        assert!(
            output.contains(cmd),
            "{shell_name} completions should contain '{cmd}' subcommand"
        );
    }
}

fn assert_contains_flags(output: &str, shell_name: &str) {
    for flag in ["--help", "--json", "--host", "--verbose", "--quiet"] {
        assert!(
            output.contains(flag),
            "{shell_name} completions should contain '{flag}' flag"
        );
    }
}

#[test]
fn e2e_completions_every_shell() {
    let _log = common::test_log("e2e_completions_every_shell");
    let workspace = LabWorkspace::bare_dir();

    for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
        let run = run_lab(&workspace, ["completions", shell], &format!("completions_{shell}"));
        assert!(run.status.success(), "{shell} failed: {}", run.stderr);
        assert_contains_subcommands(&run.stdout, shell);
        if shell != "fish" {
            assert_contains_flags(&run.stdout, shell);
        }
        info!("e2e_completions_every_shell: {shell} ok ({} bytes)", run.stdout.len());
    }
}

#[test]
fn e2e_completions_bash_function_name() {
    let _log = common::test_log("e2e_completions_bash_function_name");
    let workspace = LabWorkspace::bare_dir();

    let run = run_lab(&workspace, ["completions", "bash"], "completions_bash");
    assert!(run.status.success(), "bash failed: {}", run.stderr);
    assert!(run.stdout.contains("_lab()"), "bash completions define _lab");
}

#[test]
fn e2e_completions_fish_uses_binary_name() {
    let _log = common::test_log("e2e_completions_fish_uses_binary_name");
    let workspace = LabWorkspace::bare_dir();

    let run = run_lab(&workspace, ["completions", "fish"], "completions_fish");
    assert!(run.status.success(), "fish failed: {}", run.stderr);
    assert!(run.stdout.contains("complete -c lab"));
    assert!(run.stdout.contains("-l json"));
}

#[test]
fn e2e_completions_pwsh_alias() {
    let _log = common::test_log("e2e_completions_pwsh_alias");
    let workspace = LabWorkspace::bare_dir();

    let run = run_lab(&workspace, ["completions", "pwsh"], "completions_pwsh");
    assert!(run.status.success(), "pwsh failed: {}", run.stderr);
    assert!(run.stdout.contains("Register-ArgumentCompleter"));
}

#[test]
fn e2e_completions_output_file() {
    let _log = common::test_log("e2e_completions_output_file");
    let workspace = LabWorkspace::bare_dir();
    let target = workspace.temp_dir.path().join("lab.bash");

    let run = run_lab(
        &workspace,
        ["completions", "bash", "-o", target.to_str().expect("utf8 path")],
        "completions_file",
    );
    assert!(run.status.success(), "write failed: {}", run.stderr);
    assert!(run.stdout.is_empty());
    assert!(run.stderr.contains("Generated bash completions"), "{}", run.stderr);

    let script = std::fs::read_to_string(&target).expect("read script");
    assert_contains_subcommands(&script, "bash");
}

#[test]
fn e2e_completions_unknown_shell() {
    let _log = common::test_log("e2e_completions_unknown_shell");
    let workspace = LabWorkspace::bare_dir();

    let run = run_lab(&workspace, ["completions", "tcsh"], "completions_unknown");
    assert!(!run.status.success());
    assert!(run.stderr.contains("tcsh"), "{}", run.stderr);
}

#[test]
fn e2e_completions_idempotent() {
    let _log = common::test_log("e2e_completions_idempotent");
    let workspace = LabWorkspace::bare_dir();

    let first = run_lab(&workspace, ["completions", "zsh"], "completions_zsh_1");
    let second = run_lab(&workspace, ["completions", "zsh"], "completions_zsh_2");
    assert_eq!(first.stdout, second.stdout);
}
