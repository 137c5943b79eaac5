//! Remote command: show which remote belongs to the hosted service.

use super::Workspace;
use crate::cli::RemoteArgs;
use crate::config::CliOverrides;
use crate::error::Result;
use crate::output::OutputContext;
use crate::remote::{Address, EntityKind, RemoteCandidate};
use serde::Serialize;

#[derive(Serialize)]
struct AddressOutput<'a> {
    host: &'a str,
    namespace: &'a str,
    repository: &'a str,
    full_name: String,
    repository_url: String,
    api_base_url: String,
    issues_url: String,
    merge_requests_url: String,
}

impl<'a> AddressOutput<'a> {
    fn new(address: &'a Address) -> Self {
        Self {
            host: address.host(),
            namespace: address.namespace(),
            repository: address.repository(),
            full_name: address.full_name(),
            repository_url: address.repository_url(),
            api_base_url: address.api_base_url(),
            issues_url: address.entity_list_url(EntityKind::Issue),
            merge_requests_url: address.entity_list_url(EntityKind::MergeRequest),
        }
    }
}

#[derive(Serialize)]
struct CandidateOutput<'a> {
    #[serde(flatten)]
    candidate: &'a RemoteCandidate,
    matches_host: bool,
}

/// Execute the remote command.
///
/// # Errors
///
/// Returns an error if git fails or, without `--all`, no remote can be
/// selected.
pub fn execute(args: &RemoteArgs, overrides: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let workspace = Workspace::open(overrides)?;

    if args.all {
        let host = workspace.known_host();
        let candidates = workspace.candidates()?;
        return list_candidates(&candidates, &host, ctx);
    }

    let address = workspace.address()?;
    let output = AddressOutput::new(&address);
    if ctx.is_json() {
        return ctx.json(&output);
    }
    if ctx.is_quiet() {
        return Ok(());
    }

    ctx.heading(&address.to_string());
    ctx.field("Project", &output.full_name);
    ctx.field("Web", &output.repository_url);
    ctx.field("API", &output.api_base_url);
    ctx.field("Issues", &output.issues_url);
    ctx.field("Merge requests", &output.merge_requests_url);
    Ok(())
}

fn list_candidates(candidates: &[RemoteCandidate], host: &str, ctx: &OutputContext) -> Result<()> {
    if ctx.is_json() {
        let rows: Vec<_> = candidates
            .iter()
            .map(|candidate| CandidateOutput {
                candidate,
                matches_host: candidate.is_on_host(host),
            })
            .collect();
        return ctx.json(&rows);
    }

    if candidates.is_empty() {
        ctx.print("No remotes configured.");
        return Ok(());
    }

    for candidate in candidates {
        ctx.print(&describe(candidate, host));
    }
    Ok(())
}

fn describe(candidate: &RemoteCandidate, host: &str) -> String {
    let status = match &candidate.address {
        Some(address) if candidate.is_on_host(host) => format!("{} (matches {host})", address.full_name()),
        Some(address) => format!("{} (on {})", address.full_name(), address.host()),
        None => "(unrecognized URL)".to_string(),
    };
    format!("{}\t{}\t{status}", candidate.name, candidate.raw_url)
}
