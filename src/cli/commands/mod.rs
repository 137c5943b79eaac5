//! Command implementations.

pub mod browse;
pub mod completions;
pub mod compose;
pub mod config;
pub mod remote;
pub mod version;

use crate::config::{self as lab_config, CliOverrides, ConfigLayer};
use crate::error::Result;
use crate::git::GitRepo;
use crate::remote::{Address, RemoteCandidate, select};
use std::env;
use tracing::debug;

/// Repository and merged configuration shared by repository-bound commands.
pub struct Workspace {
    pub repo: GitRepo,
    pub config: ConfigLayer,
}

impl Workspace {
    /// Discover the repository around the current directory and load config.
    ///
    /// # Errors
    ///
    /// Returns `NotARepository` outside a working copy, or a config error.
    pub fn open(overrides: &CliOverrides) -> Result<Self> {
        let cwd = env::current_dir()?;
        let repo = GitRepo::discover(&cwd)?;
        let work_tree = repo.work_tree().ok();
        let config = lab_config::load_config(work_tree.as_deref(), overrides)?;
        Ok(Self { repo, config })
    }

    /// Host remotes are matched against.
    #[must_use]
    pub fn known_host(&self) -> String {
        lab_config::known_host(&self.config)
    }

    /// Configured remotes as parsed candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot list remotes.
    pub fn candidates(&self) -> Result<Vec<RemoteCandidate>> {
        Ok(RemoteCandidate::from_pairs(self.repo.remotes()?))
    }

    /// Address of the remote on the known host.
    ///
    /// # Errors
    ///
    /// Propagates selection errors.
    pub fn address(&self) -> Result<Address> {
        let host = self.known_host();
        let candidates = self.candidates()?;
        let address = select(&candidates, &host)?;
        debug!(address = %address, "Resolved project address");
        Ok(address)
    }
}
