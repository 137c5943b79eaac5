//! Editor-driven composition of a title and body.
//!
//! An [`EditorSession`] owns one scratch file per topic under the git
//! directory (`<gitdir>/<TOPIC>_EDITMSG`), opens it in the user's editor and
//! extracts a title/body pair from what was saved.
//!
//! Scratch file lifecycle:
//!
//! - written with the prefill only when absent, so a retry keeps the draft
//! - deleted when the editor fails to launch or exits unsuccessfully
//! - deleted when the saved text yields an empty title
//! - otherwise retained and handed back as a [`ScratchFile`] for the caller
//!   to remove once the content has been submitted

mod message;

pub use message::{CommentMarker, extract_title_body, split_title_body, strip_comments};

use crate::error::{LabError, Result};
use crate::process::{ProcessSpawner, TerminalSpawner, split_command};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SCRATCH_SUFFIX: &str = "_EDITMSG";

/// Extra arguments for vim-family editors so the message opens as markdown.
const VIM_ARGS: [&str; 2] = ["--cmd", "set ft=markdown tw=0 wrap lbr"];

/// Explicit inputs for an editor session.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    /// Editor command, possibly with leading arguments (`code --wait`).
    pub program: String,
    /// Directory holding scratch files, normally the git directory.
    pub scratch_dir: PathBuf,
    /// Comment marker stripped from the saved text.
    pub marker: CommentMarker,
}

/// A retained scratch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file. An already-missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Removed scratch file");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Result of a successful composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub title: String,
    pub body: String,
    pub scratch_file: ScratchFile,
}

/// Composes messages through an external editor.
pub struct EditorSession<S = TerminalSpawner> {
    settings: EditorSettings,
    spawner: S,
}

impl<S: ProcessSpawner> EditorSession<S> {
    #[must_use]
    pub const fn new(settings: EditorSettings, spawner: S) -> Self {
        Self { settings, spawner }
    }

    #[must_use]
    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Scratch file location for `topic`, stable across invocations.
    ///
    /// # Errors
    ///
    /// Returns a config error for a blank topic.
    pub fn scratch_path(&self, topic: &str) -> Result<PathBuf> {
        Ok(self.settings.scratch_dir.join(scratch_file_name(topic)?))
    }

    /// Run the editor for `topic` and extract a title and body.
    ///
    /// # Errors
    ///
    /// - [`LabError::EditorLaunch`] if the editor cannot run or fails
    /// - [`LabError::EmptyTitle`] if the saved text has no title
    /// - I/O errors reading or writing the scratch file
    pub fn compose(&self, topic: &str, prefill: Option<&str>) -> Result<Composition> {
        let path = self.scratch_path(topic)?;
        let scratch_file = ScratchFile { path };

        self.write_prefill(&scratch_file.path, prefill)?;

        if let Err(err) = self.launch(&scratch_file.path) {
            warn!(topic, program = %self.settings.program, error = %err, "Editor failed");
            discard(&scratch_file);
            return Err(LabError::editor_launch(topic, &self.settings.program, err));
        }

        // Editors may save in another encoding; undecodable bytes become U+FFFD.
        let content = match fs::read(&scratch_file.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let (title, body) = extract_title_body(&content, &self.settings.marker);
        if title.is_empty() {
            info!(topic, "Empty title, discarding message");
            discard(&scratch_file);
            return Err(LabError::EmptyTitle {
                topic: topic.to_string(),
            });
        }

        debug!(topic, title = %title, body_len = body.len(), "Composed message");
        Ok(Composition {
            title,
            body,
            scratch_file,
        })
    }

    fn write_prefill(&self, path: &Path, prefill: Option<&str>) -> Result<()> {
        let Some(message) = prefill.filter(|message| !message.is_empty()) else {
            return Ok(());
        };
        if path.exists() {
            debug!(path = %path.display(), "Keeping existing draft");
            return Ok(());
        }
        fs::write(path, message)?;
        debug!(path = %path.display(), "Wrote prefill");
        Ok(())
    }

    fn launch(&self, path: &Path) -> anyhow::Result<()> {
        let (program, args) = editor_command(&self.settings.program, path)?;
        debug!(program = %program, ?args, "Launching editor");
        self.spawner.run(&program, &args)
    }
}

fn discard(file: &ScratchFile) {
    if let Err(err) = file.remove() {
        warn!(path = %file.path.display(), error = %err, "Failed to remove scratch file");
    }
}

/// File name for a topic: upper-cased, non-alphanumerics replaced by `_`,
/// with an `_EDITMSG` suffix.
///
/// # Errors
///
/// Returns a config error for a blank topic.
pub fn scratch_file_name(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(LabError::Config("editor topic must not be empty".to_string()));
    }
    let tag: String = topic
        .chars()
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect();
    Ok(format!("{tag}{SCRATCH_SUFFIX}"))
}

/// Program and full argument list for editing `path`.
fn editor_command(command: &str, path: &Path) -> anyhow::Result<(String, Vec<String>)> {
    let (program, mut args) = split_command(command)?;
    if is_vim_family(&program) {
        args.extend(VIM_ARGS.iter().map(ToString::to_string));
    }
    args.push(path.display().to_string());
    Ok((program, args))
}

fn is_vim_family(program: &str) -> bool {
    let name = Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program);
    let name = name.strip_suffix(".exe").unwrap_or(name);
    name.ends_with("vim")
}

/// Default prefill for composing an entity such as an issue.
///
/// The guidance is wrapped in `marker` so it never reaches the result.
#[must_use]
pub fn default_template(label: &str, marker: &CommentMarker) -> String {
    let guidance = format!(
        "Write a message for this {label}. The first block of text is the title \
         and the rest is the description."
    );
    format!("\n\n{}\n", marker.wrap(&guidance))
}
