//! Opening web pages in the user's browser.

use crate::error::{LabError, Result};
use crate::process::{ProcessSpawner, split_command};
use tracing::info;

/// Open `url` with the `browser` command through `spawner`.
///
/// `browser` may carry leading arguments (`firefox --new-tab`); the URL is
/// appended last.
///
/// # Errors
///
/// Returns [`LabError::Browser`] if the command is blank, badly quoted, or
/// fails.
pub fn open_url<S: ProcessSpawner>(spawner: &S, browser: &str, url: &str) -> Result<()> {
    let (program, mut args) = split_command(browser).map_err(|err| LabError::Browser {
        program: browser.to_string(),
        reason: format!("{err:#}"),
    })?;
    args.push(url.to_string());

    info!(program = %program, url, "Opening browser");
    spawner.run(&program, &args).map_err(|err| LabError::Browser {
        program,
        reason: format!("{err:#}"),
    })
}
