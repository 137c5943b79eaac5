//! Web and API URLs for a hosted repository.

use super::ParseError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Root of the hosted service's REST API.
const API_ROOT: &str = "api/v4";

/// Structured identifier of a hosted repository.
///
/// `host`, `namespace` and `repository` are non-empty and free of whitespace;
/// `namespace` may contain `/` for nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    host: String,
    namespace: String,
    repository: String,
}

impl Address {
    /// Build an address from its components.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if a component is empty, contains whitespace,
    /// the namespace has an empty group segment, or the repository still
    /// carries a `.git` suffix or a `/`.
    pub fn new(
        host: impl Into<String>,
        namespace: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let host = host.into();
        let namespace = namespace.into();
        let repository = repository.into();
        let raw = format!("{host}:{namespace}/{repository}");

        let has_space = |value: &str| value.chars().any(char::is_whitespace);
        let valid_host = !host.is_empty()
            && !has_space(&host)
            && !host.contains(['/', ':', '@']);
        let valid_namespace = !has_space(&namespace)
            && !namespace.is_empty()
            && namespace.split('/').all(|segment| !segment.is_empty());
        let valid_repository = !repository.is_empty()
            && !has_space(&repository)
            && !repository.contains('/')
            && !repository.to_ascii_lowercase().ends_with(".git");

        if valid_host && valid_namespace && valid_repository {
            Ok(Self {
                host,
                namespace,
                repository,
            })
        } else {
            Err(ParseError::unrecognized(&raw))
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// `namespace/repository`, the project path used by the API.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.repository)
    }

    /// `https://{host}`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }

    /// `https://{host}/{namespace}/{repository}`
    #[must_use]
    pub fn repository_url(&self) -> String {
        format!("{}/{}", self.base_url(), self.full_name())
    }

    /// `https://{host}/api/v4`
    #[must_use]
    pub fn api_base_url(&self) -> String {
        format!("{}/{API_ROOT}", self.base_url())
    }

    /// Web page listing entities of `kind`.
    #[must_use]
    pub fn entity_list_url(&self, kind: EntityKind) -> String {
        format!("{}/{}", self.repository_url(), kind.path_segment())
    }

    /// Web page of one entity.
    #[must_use]
    pub fn entity_detail_url(&self, kind: EntityKind, id: u64) -> String {
        format!("{}/{id}", self.entity_list_url(kind))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.full_name())
    }
}

/// Entities tracked by the hosted service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Issue,
    MergeRequest,
}

impl EntityKind {
    /// URL segment under the repository page.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::MergeRequest => "merge_requests",
        }
    }

    /// Topic tag used for editor scratch files.
    #[must_use]
    pub const fn topic(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::MergeRequest => "merge-request",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Issue => "issue",
            Self::MergeRequest => "merge request",
        };
        f.write_str(label)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "issue" | "issues" | "i" => Ok(Self::Issue),
            "merge-request" | "merge_request" | "merge-requests" | "merge_requests" | "mr" => {
                Ok(Self::MergeRequest)
            }
            other => Err(format!(
                "unknown entity kind '{other}' (expected issue or merge-request)"
            )),
        }
    }
}
