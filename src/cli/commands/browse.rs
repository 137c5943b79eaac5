//! Browse command: open a project, issue or merge request page.

use super::Workspace;
use crate::browser;
use crate::cli::BrowseArgs;
use crate::config::{CliOverrides, resolve_browser};
use crate::error::{LabError, Result};
use crate::output::OutputContext;
use crate::process::TerminalSpawner;
use crate::remote::Address;
use serde_json::json;
use tracing::info;

/// Execute the browse command.
///
/// # Errors
///
/// Returns an error if no remote can be selected, the target takes no ID,
/// or the browser fails.
pub fn execute(args: &BrowseArgs, overrides: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let workspace = Workspace::open(overrides)?;
    let address = workspace.address()?;
    let url = target_url(&address, args)?;

    if args.print || ctx.is_json() {
        if ctx.is_json() {
            ctx.json(&json!({ "url": url }))?;
        } else {
            println!("{url}");
        }
        return Ok(());
    }

    let browser = resolve_browser(&workspace.config);
    info!(url = %url, browser = %browser, "Opening page");
    browser::open_url(&TerminalSpawner, &browser, &url)?;
    ctx.success(&format!("Opened {url}"));
    Ok(())
}

fn target_url(address: &Address, args: &BrowseArgs) -> Result<String> {
    match (args.target.entity(), args.id) {
        (None, None) => Ok(address.repository_url()),
        (None, Some(_)) => Err(LabError::Config(
            "an ID needs an issue or merge-request target".to_string(),
        )),
        (Some(kind), None) => Ok(address.entity_list_url(kind)),
        (Some(kind), Some(id)) => Ok(address.entity_detail_url(kind, id)),
    }
}
