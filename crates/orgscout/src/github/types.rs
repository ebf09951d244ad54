//! GitHub API wire types.

use serde::{Deserialize, Serialize};

/// One page of results from a GitHub search endpoint.
///
/// Both `/search/repositories` and `/search/users` wrap their results in
/// this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage<T> {
    /// Total number of matches across all pages, as reported by the API.
    pub total_count: u64,
    /// The matches on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A repository item from `/search/repositories`.
///
/// Only the owner is of interest here; the repository itself is just the
/// vehicle that surfaces the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoItem {
    /// The account that owns the repository.
    pub owner: RepoOwner,
}

/// The owning account of a repository search item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    /// Account type: `"Organization"` or `"User"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// API URL of the account profile.
    pub url: String,
    pub html_url: String,
}

/// A user-search hit from `/search/users`.
///
/// The org-search query already filters on `type:org`, so hits are taken
/// as-is without inspecting the account type again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgHit {
    pub login: String,
    /// API URL of the account profile.
    pub url: String,
    pub html_url: String,
}

/// An organization profile fetched from its API URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgProfile {
    pub login: String,
    pub html_url: String,
    /// The website the organization declares on its profile.
    ///
    /// May be missing, null, or the empty string; all three read as
    /// "no declared website".
    #[serde(default)]
    pub blog: Option<String>,
}

impl OrgProfile {
    /// The declared website, if one is present and non-empty.
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.blog.as_deref().filter(|s| !s.is_empty())
    }
}
