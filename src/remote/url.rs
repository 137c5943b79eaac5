//! Remote URL parsing.
//!
//! Two shapes refer to the same hosted repository:
//!
//! - SSH (scp-like): `user@host:namespace/path/repository[.git]`
//! - URL: `scheme://[user@]host[:port]/namespace/path/repository[.git]`
//!
//! The last path segment is the repository, everything before it is the
//! namespace (nested groups allowed). Parsing is pure.

use super::Address;
use thiserror::Error;

const UNRECOGNIZED: &str = "unrecognized remote URL";

/// A remote URL that does not describe a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}: {raw}")]
pub struct ParseError {
    pub reason: String,
    pub raw: String,
}

impl ParseError {
    pub(crate) fn unrecognized(raw: &str) -> Self {
        Self {
            reason: UNRECOGNIZED.to_string(),
            raw: raw.to_string(),
        }
    }
}

/// Parse a remote URL into an [`Address`].
///
/// # Errors
///
/// Returns [`ParseError`] when no host can be found, the path has fewer than
/// two segments, or any component is empty or contains whitespace.
pub fn parse(raw_url: &str) -> Result<Address, ParseError> {
    let trimmed = raw_url.trim();
    let unrecognized = || ParseError::unrecognized(raw_url);

    let (host, path) = match trimmed.split_once("://") {
        Some((scheme, rest)) => {
            if !is_scheme(scheme) {
                return Err(unrecognized());
            }
            split_authority(rest).ok_or_else(unrecognized)?
        }
        None => split_scp_like(trimmed).ok_or_else(unrecognized)?,
    };

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if segments.len() < 2 || segments.iter().any(|segment| segment.is_empty()) {
        return Err(unrecognized());
    }

    let (last, namespace) = segments.split_last().ok_or_else(unrecognized)?;
    let repository = strip_git_suffix(last);

    Address::new(host, namespace.join("/"), repository).map_err(|_| unrecognized())
}

fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split `[user@]host[:port]/path` into host and path.
fn split_authority(rest: &str) -> Option<(&str, &str)> {
    let (authority, path) = rest.split_once('/')?;
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        Some(_) => return None,
        None => host_port,
    };
    (!host.is_empty()).then_some((host, path))
}

/// Split `[user@]host:path` into host and path.
fn split_scp_like(trimmed: &str) -> Option<(&str, &str)> {
    let (left, path) = trimmed.split_once(':')?;
    if left.contains('/') {
        return None;
    }
    let host = left.rsplit_once('@').map_or(left, |(_, host)| host);
    (!host.is_empty()).then_some((host, path))
}

/// Remove trailing `.git` suffixes, case-insensitively.
fn strip_git_suffix(segment: &str) -> &str {
    let mut name = segment;
    while name.len() >= 4 {
        match name.get(name.len() - 4..) {
            Some(suffix) if suffix.eq_ignore_ascii_case(".git") => {
                name = &name[..name.len() - 4];
            }
            _ => break,
        }
    }
    name
}
