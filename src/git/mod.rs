//! Local git metadata, read through the `git` command line.

use crate::error::{LabError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, trace};

/// A git working copy located from some starting directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepo {
    cwd: PathBuf,
    git_dir: PathBuf,
}

impl GitRepo {
    /// Find the repository containing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::NotARepository`] if `start` is not inside a git
    /// working copy or git cannot be run.
    pub fn discover(start: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--absolute-git-dir"])
            .current_dir(start)
            .output()
            .map_err(|e| {
                debug!(error = %e, "Failed to run git");
                LabError::NotARepository
            })?;

        if !output.status.success() {
            return Err(LabError::NotARepository);
        }

        let git_dir = PathBuf::from(stdout_line(&output));
        debug!(git_dir = %git_dir.display(), "Discovered repository");
        Ok(Self {
            cwd: start.to_path_buf(),
            git_dir,
        })
    }

    /// Absolute path of the `.git` directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Top-level directory of the working tree.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Git`] for bare repositories or git failures.
    pub fn work_tree(&self) -> Result<PathBuf> {
        let output = self.git(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(git_failure("rev-parse --show-toplevel", &output));
        }
        Ok(PathBuf::from(stdout_line(&output)))
    }

    /// Configured remotes as `(name, url)` pairs, in configuration order.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Git`] if git reports an error other than "no
    /// remotes configured".
    pub fn remotes(&self) -> Result<Vec<(String, String)>> {
        let output = self.git(&["config", "--get-regexp", r"^remote\..*\.url$"])?;
        // Exit status 1 means no matching key.
        match output.status.code() {
            Some(0) => {}
            Some(1) => return Ok(Vec::new()),
            _ => return Err(git_failure("config --get-regexp", &output)),
        }
        let remotes = parse_remote_config(&String::from_utf8_lossy(&output.stdout));
        debug!(count = remotes.len(), "Read git remotes");
        Ok(remotes)
    }

    /// The editor git itself would use, if git can tell.
    #[must_use]
    pub fn editor(&self) -> Option<String> {
        let output = self.git(&["var", "GIT_EDITOR"]).ok()?;
        if !output.status.success() {
            return None;
        }
        let editor = stdout_line(&output);
        (!editor.is_empty()).then_some(editor)
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        trace!(?args, "Running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| LabError::Git {
                command: args.join(" "),
                stderr: format!("failed to run git: {e}"),
            })
    }
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn git_failure(command: &str, output: &Output) -> LabError {
    LabError::Git {
        command: command.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// Parse `git config --get-regexp '^remote\..*\.url$'` output.
///
/// Each line is `remote.<name>.url <url>`; names may contain dots. Lines
/// that do not have this shape are skipped.
#[must_use]
pub fn parse_remote_config(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (key, url) = line.trim().split_once(char::is_whitespace)?;
            let name = key.strip_prefix("remote.")?.strip_suffix(".url")?;
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), url.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_remote_lines_in_order() {
        let text = "remote.origin.url git@gitlab.com:group/project.git\n\
                    remote.my.fork.url https://gitlab.com/me/project\n\
                    remote.github.url git@github.com:me/project.git\n";
        let remotes = parse_remote_config(text);
        assert_eq!(
            remotes,
            [
                (
                    "origin".to_string(),
                    "git@gitlab.com:group/project.git".to_string()
                ),
                ("my.fork".to_string(), "https://gitlab.com/me/project".to_string()),
                (
                    "github".to_string(),
                    "git@github.com:me/project.git".to_string()
                ),
            ]
        );
    }

    #[test]
    fn skips_malformed_lines() {
        let text = "\nremote.origin.pushurl x\nremote..url y\nnot-a-key\nremote.ok.url  z \n";
        assert_eq!(
            parse_remote_config(text),
            [("ok".to_string(), "z".to_string())]
        );
    }

    fn git_init(dir: &Path) -> bool {
        Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir)
            .status()
            .is_ok_and(|status| status.success())
    }

    #[test]
    fn reads_remotes_from_a_real_repository() {
        let dir = TempDir::new().unwrap();
        if !git_init(dir.path()) {
            return;
        }
        for (name, url) in [
            ("origin", "git@gitlab.com:group/project.git"),
            ("upstream", "https://gitlab.com/team/project"),
        ] {
            let status = Command::new("git")
                .args(["remote", "add", name, url])
                .current_dir(dir.path())
                .status()
                .unwrap();
            assert!(status.success());
        }

        let repo = GitRepo::discover(dir.path()).unwrap();
        assert!(repo.git_dir().ends_with(".git"));
        assert_eq!(
            repo.work_tree().unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        let names: Vec<_> = repo.remotes().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["origin", "upstream"]);
    }

    #[test]
    fn repository_without_remotes_is_empty() {
        let dir = TempDir::new().unwrap();
        if !git_init(dir.path()) {
            return;
        }
        let repo = GitRepo::discover(dir.path()).unwrap();
        assert!(repo.remotes().unwrap().is_empty());
    }
}
