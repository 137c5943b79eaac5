use crate::error::Result;
use crossterm::style::Stylize;
use std::io::IsTerminal;

/// Central output coordinator that respects json/quiet modes.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Colored text for an interactive terminal
    Rich,
    /// Plain text, no ANSI codes (for piping)
    Plain,
    /// JSON output only
    Json,
    /// Minimal output (quiet mode)
    Quiet,
}

impl OutputContext {
    /// Create from CLI-style flags, `NO_COLOR` and TTY detection.
    #[must_use]
    pub fn from_flags(json: bool, quiet: bool, no_color: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else if no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal()
        {
            OutputMode::Plain
        } else {
            OutputMode::Rich
        };
        Self { mode }
    }

    #[must_use]
    pub const fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    // ─────────────────────────────────────────────────────────────
    // Mode Checks
    // ─────────────────────────────────────────────────────────────

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub fn is_rich(&self) -> bool {
        self.mode == OutputMode::Rich
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.mode == OutputMode::Quiet
    }

    // ─────────────────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────────────────

    /// Print a line of text in Rich and Plain modes.
    pub fn print(&self, content: &str) {
        if matches!(self.mode, OutputMode::Rich | OutputMode::Plain) {
            println!("{content}");
        }
    }

    /// Print the value as pretty JSON in Json mode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    /// `label: value`, with the label dimmed in Rich mode.
    pub fn field(&self, label: &str, value: &str) {
        match self.mode {
            OutputMode::Rich => println!("{} {value}", format!("{label}:").dim()),
            OutputMode::Plain => println!("{label}: {value}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    /// Emphasized heading line.
    pub fn heading(&self, title: &str) {
        match self.mode {
            OutputMode::Rich => println!("{}", title.bold()),
            OutputMode::Plain => println!("{title}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Rich => println!("{} {message}", "✓".green().bold()),
            OutputMode::Plain => println!("✓ {message}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Rich => eprintln!("{} {}", "⚠".yellow().bold(), message.yellow()),
            OutputMode::Plain => eprintln!("Warning: {message}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn newline(&self) {
        if matches!(self.mode, OutputMode::Rich | OutputMode::Plain) {
            println!();
        }
    }
}
