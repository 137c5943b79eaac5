use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use std::time::{Duration, Instant, SystemTime};
use tempfile::TempDir;

#[derive(Debug)]
pub struct LabRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

/// A temporary `git init` working copy with an isolated home directory.
pub struct LabWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
    pub log_dir: PathBuf,
}

impl LabWorkspace {
    /// Empty directory that is not a git repository.
    pub fn bare_dir() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let base = temp_dir.path().to_path_buf();
        let root = base.join("repo");
        let home = base.join("home");
        let log_dir = base.join("logs");
        for dir in [&root, &home, &log_dir] {
            fs::create_dir_all(dir).expect("create dir");
        }
        Self {
            temp_dir,
            root,
            home,
            log_dir,
        }
    }

    /// Initialized git repository without remotes.
    pub fn new() -> Self {
        let workspace = Self::bare_dir();
        workspace.git(&["init", "-q"]);
        workspace
    }

    /// Initialized git repository with the given `(name, url)` remotes.
    pub fn with_remotes(remotes: &[(&str, &str)]) -> Self {
        let workspace = Self::new();
        for (name, url) in remotes {
            workspace.git(&["remote", "add", name, url]);
        }
        workspace
    }

    pub fn git(&self, args: &[&str]) {
        let status = StdCommand::new("git")
            .args(args)
            .current_dir(&self.root)
            .env("HOME", &self.home)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .status()
            .expect("run git");
        assert!(status.success(), "git {args:?} failed");
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(".git")
    }

    /// Write an executable shell script under the temp dir and return its path.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp_dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    /// Base command with an isolated environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lab"));
        cmd.current_dir(&self.root);
        for key in [
            "LAB_HOST",
            "LAB_EDITOR",
            "LAB_BROWSER",
            "LAB_COMMENT_OPEN",
            "LAB_COMMENT_CLOSE",
            "VISUAL",
            "EDITOR",
            "GIT_EDITOR",
            "XDG_CONFIG_HOME",
        ] {
            cmd.env_remove(key);
        }
        cmd.env("NO_COLOR", "1");
        cmd.env("RUST_LOG", "lab_rust=debug");
        cmd.env("RUST_BACKTRACE", "1");
        cmd.env("HOME", &self.home);
        cmd.env("GIT_CONFIG_NOSYSTEM", "1");
        cmd.env("GIT_CEILING_DIRECTORIES", self.temp_dir.path());
        cmd
    }
}

pub fn run_lab<I, S>(workspace: &LabWorkspace, args: I, label: &str) -> LabRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_lab_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_lab_with_env<I, S, E, K, V>(
    workspace: &LabWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> LabRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = workspace.command();
    cmd.args(args);
    cmd.envs(env_vars);

    let start = Instant::now();
    let output = cmd.output().expect("run lab");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let timestamp = SystemTime::now();
    let log_body = format!(
        "label: {label}\nstarted: {:?}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        timestamp,
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    LabRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}

/// Extract the JSON document from mixed output.
pub fn extract_json_payload(output: &str) -> String {
    let lines: Vec<&str> = output.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return lines[idx..].join("\n").trim().to_string();
        }
    }
    output.trim().to_string()
}
