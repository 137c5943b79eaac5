//! External process invocation.
//!
//! Editors and browsers are launched through the [`ProcessSpawner`]
//! capability so tests can substitute a scripted implementation.

use anyhow::{Context, bail};
use std::fs::File;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs an external program to completion.
pub trait ProcessSpawner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be started or exits
    /// unsuccessfully.
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<()>;
}

impl<T: ProcessSpawner + ?Sized> ProcessSpawner for &T {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<()> {
        (**self).run(program, args)
    }
}

/// Spawns programs attached to the interactive terminal.
///
/// Stdin is reattached to `/dev/tty` when it can be opened, so editors work
/// even when lab's own stdin is a pipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSpawner;

impl ProcessSpawner for TerminalSpawner {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<()> {
        debug!(program, ?args, "Spawning process");

        let mut command = Command::new(program);
        command.args(args);
        if let Some(tty) = console_stdin() {
            command.stdin(tty);
        }

        let status = command
            .status()
            .with_context(|| format!("failed to spawn '{program}'"))?;
        if !status.success() {
            bail!("'{program}' exited with status: {status}");
        }
        Ok(())
    }
}

fn console_stdin() -> Option<Stdio> {
    if cfg!(unix) {
        File::open("/dev/tty").ok().map(Stdio::from)
    } else {
        None
    }
}

/// Split a configured command string into program and leading arguments.
///
/// Quoting follows POSIX shell rules, so git's `core.editor` values such as
/// `'/opt/My Editor/bin/subl' -w` keep their spaces.
///
/// # Errors
///
/// Returns an error for a blank command or unbalanced quotes.
pub fn split_command(command: &str) -> anyhow::Result<(String, Vec<String>)> {
    let mut words = shell_words::split(command)
        .with_context(|| format!("invalid quoting in command '{command}'"))?
        .into_iter();
    let Some(program) = words.next() else {
        bail!("no command configured");
    };
    Ok((program, words.collect()))
}
