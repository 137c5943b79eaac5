//! Turning edited message text into a title and body.

use crate::error::{LabError, Result};
use regex::Regex;
use std::fmt;

/// Marker pair delimiting a removable comment block, e.g. `<!--` / `-->`.
#[derive(Clone)]
pub struct CommentMarker {
    open: String,
    close: String,
    pattern: Regex,
}

impl CommentMarker {
    /// Build a marker pair.
    ///
    /// # Errors
    ///
    /// Returns a config error if either marker is blank.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();
        if open.trim().is_empty() || close.trim().is_empty() {
            return Err(LabError::Config(
                "comment markers must not be empty".to_string(),
            ));
        }

        // Shortest open..close span plus the line breaks right after it.
        let pattern = format!(
            r"(?s){}.*?{}(?:\r?\n)*",
            regex::escape(&open),
            regex::escape(&close)
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| LabError::Config(format!("Invalid comment marker pattern: {e}")))?;

        Ok(Self {
            open,
            close,
            pattern,
        })
    }

    /// HTML-style markers, `<!--` and `-->`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the constructor's validation.
    pub fn html() -> Result<Self> {
        Self::new("<!--", "-->")
    }

    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Wrap `text` in this marker pair.
    #[must_use]
    pub fn wrap(&self, text: &str) -> String {
        format!("{} {} {}", self.open, text, self.close)
    }
}

impl fmt::Debug for CommentMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentMarker")
            .field("open", &self.open)
            .field("close", &self.close)
            .finish()
    }
}

impl PartialEq for CommentMarker {
    fn eq(&self, other: &Self) -> bool {
        self.open == other.open && self.close == other.close
    }
}

impl Eq for CommentMarker {}

/// Remove every comment block, repeating until none is left.
///
/// Repetition covers blocks that only appear once an inner block is gone,
/// which keeps the function idempotent.
#[must_use]
pub fn strip_comments(text: &str, marker: &CommentMarker) -> String {
    let mut current = text.to_string();
    while marker.pattern.is_match(&current) {
        current = marker.pattern.replace_all(&current, "").into_owned();
    }
    current
}

/// Split text into a title and body.
///
/// Leading blank lines are skipped. Consecutive non-blank lines form the
/// title, joined with single spaces. Everything after the first blank line
/// that follows the title is the body.
#[must_use]
pub fn split_title_body(text: &str) -> (String, String) {
    let mut title_lines: Vec<&str> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in text.lines() {
        if in_body {
            body_lines.push(line);
        } else if line.trim().is_empty() {
            in_body = !title_lines.is_empty();
        } else {
            title_lines.push(line.trim());
        }
    }

    let title = title_lines.join(" ").trim().to_string();
    let body = body_lines.join("\n").trim().to_string();
    (title, body)
}

/// Trim, strip comment blocks, then split into title and body.
#[must_use]
pub fn extract_title_body(content: &str, marker: &CommentMarker) -> (String, String) {
    let stripped = strip_comments(content.trim(), marker);
    split_title_body(&stripped)
}
