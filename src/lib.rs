//! `lab_rust` - a command-line companion for GitLab-style hosted repositories.
//!
//! The library resolves which configured git remote belongs to the hosted
//! service, derives web and API URLs from it, and drives the editor-based
//! composition of titles and descriptions for issues and merge requests.

pub mod browser;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod process;
pub mod remote;

pub use editor::{CommentMarker, Composition, EditorSession, EditorSettings, ScratchFile};
pub use error::{ErrorCode, LabError, Result, StructuredError};
pub use process::{ProcessSpawner, TerminalSpawner};
pub use remote::{Address, EntityKind, ParseError, RemoteCandidate, parse, select};
