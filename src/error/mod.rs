//! Error types and handling for `lab_rust`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Accepts `anyhow` errors from collaborators through `Other`
//! - Carries enough context (raw URL, candidate remotes, topic) for an
//!   actionable message
//! - Provides structured JSON output through [`StructuredError`]

mod structured;

pub use structured::{ErrorCode, StructuredError};

use crate::remote::{ParseError, RemoteCandidate};
use thiserror::Error;

/// Primary error type for `lab_rust` operations.
#[derive(Error, Debug)]
pub enum LabError {
    // === Remote Resolution Errors ===
    /// A remote URL could not be turned into an address.
    #[error(transparent)]
    RemoteParse(#[from] ParseError),

    /// No configured remote points at the known host.
    #[error("No git remote points at '{host}'")]
    NoMatchingRemote { host: String, remotes: Vec<String> },

    /// Several remotes point at the known host and none is named `origin`.
    #[error("Ambiguous remotes for '{host}': {}", candidate_names(.candidates))]
    AmbiguousRemote {
        host: String,
        candidates: Vec<RemoteCandidate>,
    },

    // === Editor Errors ===
    /// The external editor could not be launched or exited unsuccessfully.
    #[error("error using text editor for {topic} message")]
    EditorLaunch {
        topic: String,
        program: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The edited message produced no title.
    #[error("Aborting due to empty {topic} title")]
    EmptyTitle { topic: String },

    // === Repository Errors ===
    /// The working directory is not inside a git working copy.
    #[error("Not a git repository (or any of the parent directories)")]
    NotARepository,

    /// A git invocation failed.
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    // === Browser Errors ===
    /// The web browser could not be launched.
    #[error("Failed to open browser '{program}': {reason}")]
    Browser { program: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn candidate_names(candidates: &[RemoteCandidate]) -> String {
    candidates
        .iter()
        .map(|candidate| candidate.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl LabError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RemoteParse(_)
                | Self::NoMatchingRemote { .. }
                | Self::AmbiguousRemote { .. }
                | Self::EmptyTitle { .. }
                | Self::NotARepository
                | Self::Config(_)
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::RemoteParse(_) => {
                Some("Use an SSH (git@host:group/repo.git) or HTTPS remote URL")
            }
            Self::NoMatchingRemote { .. } => {
                Some("Add a remote for the host or set `host` in ~/.config/lab/config.yaml")
            }
            Self::AmbiguousRemote { .. } => {
                Some("Name the remote you want to use 'origin' (git remote rename)")
            }
            Self::EditorLaunch { .. } => Some("Set `editor` in config, GIT_EDITOR, or EDITOR"),
            Self::EmptyTitle { .. } => Some("Write a title on the first line of the message"),
            Self::NotARepository => Some("Run lab from inside a git working copy"),
            _ => None,
        }
    }

    /// Wrap a spawner failure as an editor launch error.
    #[must_use]
    pub fn editor_launch(
        topic: impl Into<String>,
        program: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::EditorLaunch {
            topic: topic.into(),
            program: program.into(),
            source: source.into(),
        }
    }
}

/// Result type using `LabError`.
pub type Result<T> = std::result::Result<T, LabError>;
