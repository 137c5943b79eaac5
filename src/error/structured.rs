//! Structured error output.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging (raw URL, candidate remotes, topic)

use crate::error::LabError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Repository Errors (exit code 2) ===
    /// Not inside a git working copy
    NotARepository,
    /// A git invocation failed
    GitError,

    // === Remote Errors (exit code 3) ===
    /// Remote URL could not be parsed
    RemoteParseError,
    /// No remote points at the known host
    NoMatchingRemote,
    /// Several remotes point at the known host
    AmbiguousRemote,

    // === Editor Errors (exit code 4) ===
    /// Editor could not be launched or failed
    EditorLaunchFailed,
    /// Edited message has no title
    EmptyTitle,
    /// Browser could not be launched
    BrowserLaunchFailed,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Config parse error
    ConfigParseError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotARepository => "NOT_A_REPOSITORY",
            Self::GitError => "GIT_ERROR",
            Self::RemoteParseError => "REMOTE_PARSE_ERROR",
            Self::NoMatchingRemote => "NO_MATCHING_REMOTE",
            Self::AmbiguousRemote => "AMBIGUOUS_REMOTE",
            Self::EditorLaunchFailed => "EDITOR_LAUNCH_FAILED",
            Self::EmptyTitle => "EMPTY_TITLE",
            Self::BrowserLaunchFailed => "BROWSER_LAUNCH_FAILED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ConfigParseError => "CONFIG_PARSE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether re-invoking the command after fixing the input may succeed.
    ///
    /// Nothing is retried automatically; this only informs the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::EditorLaunchFailed | Self::EmptyTitle | Self::AmbiguousRemote
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Repository errors
    /// - 3: Remote resolution errors
    /// - 4: Editor and browser errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotARepository | Self::GitError => 2,
            Self::RemoteParseError | Self::NoMatchingRemote | Self::AmbiguousRemote => 3,
            Self::EditorLaunchFailed | Self::EmptyTitle | Self::BrowserLaunchFailed => 4,
            Self::ConfigError | Self::ConfigParseError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `LabError`.
    #[must_use]
    pub fn from_error(err: &LabError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &LabError) -> (ErrorCode, Option<Value>) {
        match err {
            LabError::RemoteParse(parse) => (
                ErrorCode::RemoteParseError,
                Some(json!({"raw_url": parse.raw, "reason": parse.reason})),
            ),
            LabError::NoMatchingRemote { host, remotes } => (
                ErrorCode::NoMatchingRemote,
                Some(json!({"host": host, "remotes": remotes})),
            ),
            LabError::AmbiguousRemote { host, candidates } => (
                ErrorCode::AmbiguousRemote,
                Some(json!({
                    "host": host,
                    "candidates": candidates
                        .iter()
                        .map(|c| json!({"name": c.name, "url": c.raw_url}))
                        .collect::<Vec<_>>(),
                })),
            ),
            LabError::EditorLaunch {
                topic,
                program,
                source,
            } => (
                ErrorCode::EditorLaunchFailed,
                Some(json!({
                    "topic": topic,
                    "program": program,
                    "cause": source.to_string(),
                })),
            ),
            LabError::EmptyTitle { topic } => (ErrorCode::EmptyTitle, Some(json!({"topic": topic}))),
            LabError::NotARepository => (ErrorCode::NotARepository, None),
            LabError::Git { command, stderr } => (
                ErrorCode::GitError,
                Some(json!({"command": command, "stderr": stderr})),
            ),
            LabError::Browser { program, reason } => (
                ErrorCode::BrowserLaunchFailed,
                Some(json!({"program": program, "reason": reason})),
            ),
            LabError::Config(_) => (ErrorCode::ConfigError, None),
            LabError::Yaml(_) => (ErrorCode::ConfigParseError, None),
            LabError::Io(_) => (ErrorCode::IoError, None),
            LabError::Json(_) => (ErrorCode::JsonError, None),
            LabError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn generate_hint(err: &LabError) -> Option<String> {
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            LabError::Browser { .. } => {
                Some("Set `browser` in config or use --print to show the URL.".to_string())
            }
            LabError::Yaml(_) => Some("Check the YAML syntax of your lab config files.".to_string()),
            _ => None,
        }
    }
}
