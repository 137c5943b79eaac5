//! Choosing the remote that belongs to the hosted service.

use super::{Address, RemoteCandidate, parse};
use crate::error::{LabError, Result};
use tracing::debug;

/// Remote name preferred when several remotes point at the known host.
const PREFERRED_REMOTE: &str = "origin";

/// Pick the address of the remote that lives on `known_host`.
///
/// Policy:
/// 1. Candidates whose URL does not parse are dropped silently, unless the
///    candidate is the only one configured, in which case its parse error is
///    returned.
/// 2. The rest are filtered to those whose host equals `known_host`
///    (case-insensitive).
/// 3. Zero matches is [`LabError::NoMatchingRemote`], one match wins, and
///    with several matches `origin` wins; otherwise
///    [`LabError::AmbiguousRemote`].
///
/// # Errors
///
/// See the policy above.
pub fn select(candidates: &[RemoteCandidate], known_host: &str) -> Result<Address> {
    if let [only] = candidates {
        if let Err(err) = parse(&only.raw_url) {
            return Err(err.into());
        }
    }

    let matches: Vec<(&RemoteCandidate, Address)> = candidates
        .iter()
        .filter_map(|candidate| {
            let Ok(address) = parse(&candidate.raw_url) else {
                debug!(remote = %candidate.name, url = %candidate.raw_url, "Dropping unparsable remote");
                return None;
            };
            address
                .host()
                .eq_ignore_ascii_case(known_host)
                .then_some((candidate, address))
        })
        .collect();

    debug!(
        host = known_host,
        total = candidates.len(),
        matching = matches.len(),
        "Filtered remotes by host"
    );

    let (chosen, address) = match matches.as_slice() {
        [] => {
            return Err(LabError::NoMatchingRemote {
                host: known_host.to_string(),
                remotes: candidates.iter().map(|c| c.name.clone()).collect(),
            });
        }
        [(candidate, address)] => (*candidate, address),
        several => several
            .iter()
            .find(|(candidate, _)| candidate.name == PREFERRED_REMOTE)
            .map(|(candidate, address)| (*candidate, address))
            .ok_or_else(|| LabError::AmbiguousRemote {
                host: known_host.to_string(),
                candidates: several.iter().map(|(c, _)| RemoteCandidate::clone(c)).collect(),
            })?,
    };

    debug!(remote = %chosen.name, address = %address, "Selected remote");
    Ok(address.clone())
}
