//! Compose command: edit a title and description in the user's editor.

use super::Workspace;
use crate::cli::ComposeArgs;
use crate::config::{self, CliOverrides};
use crate::editor::{Composition, EditorSession, EditorSettings, default_template};
use crate::error::Result;
use crate::output::OutputContext;
use crate::process::TerminalSpawner;
use crate::remote::EntityKind;
use tracing::{debug, info};

/// Execute the compose command.
///
/// The printed result stands in for submission, so the scratch file is
/// removed afterwards unless `--keep` is given.
///
/// # Errors
///
/// Returns an error if the editor fails, the title is empty, or the
/// scratch file cannot be handled.
pub fn execute(args: &ComposeArgs, overrides: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let workspace = Workspace::open(overrides)?;
    let marker = config::comment_marker(&workspace.config)?;
    let program = config::resolve_editor(&workspace.config, workspace.repo.editor());
    debug!(program = %program, "Resolved editor");

    let prefill = args
        .message
        .clone()
        .unwrap_or_else(|| default_template(&topic_label(&args.topic), &marker));

    let settings = EditorSettings {
        program,
        scratch_dir: workspace.repo.git_dir().to_path_buf(),
        marker,
    };
    let session = EditorSession::new(settings, TerminalSpawner);
    let composition = session.compose(&args.topic, Some(&prefill))?;

    render(&composition, ctx)?;

    if args.keep {
        info!(path = %composition.scratch_file.path().display(), "Keeping scratch file");
    } else {
        composition.scratch_file.remove()?;
    }
    Ok(())
}

/// Human label for a topic: entity topics read naturally, others verbatim.
fn topic_label(topic: &str) -> String {
    topic
        .parse::<EntityKind>()
        .map_or_else(|_| topic.trim().to_string(), |kind| kind.to_string())
}

fn render(composition: &Composition, ctx: &OutputContext) -> Result<()> {
    if ctx.is_json() {
        return ctx.json(composition);
    }
    ctx.heading(&composition.title);
    if !composition.body.is_empty() {
        ctx.newline();
        ctx.print(&composition.body);
    }
    Ok(())
}
