//! Organization extraction from search results.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::github::{OrgHit, RepoItem};

/// Account type GitHub reports for organizations.
const ORGANIZATION_TYPE: &str = "Organization";

/// Identity tuple of an organization.
///
/// Two search items refer to the same organization exactly when all three
/// fields match; this is the dedup key for the topic path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgIdentity {
    pub login: String,
    pub api_url: String,
    pub html_url: String,
}

/// An organization collected by a discovery run.
///
/// Created from a raw search item, enriched in a second pass (website
/// lookup, hiring probe), then flattened into an output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub login: String,
    pub api_url: String,
    pub html_url: String,
    /// Website from the profile's `blog` field, once resolved.
    pub declared_website: Option<String>,
    /// Whether the declared website links to hiring-related content.
    ///
    /// Only computed in the topic path; `None` means "not probed".
    pub has_hiring_signal: Option<bool>,
}

impl From<OrgIdentity> for OrganizationRecord {
    fn from(identity: OrgIdentity) -> Self {
        Self {
            login: identity.login,
            api_url: identity.api_url,
            html_url: identity.html_url,
            declared_website: None,
            has_hiring_signal: None,
        }
    }
}

impl From<OrgHit> for OrganizationRecord {
    fn from(hit: OrgHit) -> Self {
        Self {
            login: hit.login,
            api_url: hit.url,
            html_url: hit.html_url,
            declared_website: None,
            has_hiring_signal: None,
        }
    }
}

/// Extract distinct organization identities from repository search items.
///
/// Keeps owners whose account type is `"Organization"` and drops repeats of
/// the same identity tuple, preserving first-seen order.
#[must_use]
pub fn organizations_from_repos(items: &[RepoItem]) -> Vec<OrgIdentity> {
    let mut seen = HashSet::new();
    let mut organizations = Vec::new();

    for item in items {
        let owner = &item.owner;
        if owner.kind != ORGANIZATION_TYPE {
            continue;
        }
        let identity = OrgIdentity {
            login: owner.login.clone(),
            api_url: owner.url.clone(),
            html_url: owner.html_url.clone(),
        };
        if seen.insert(identity.clone()) {
            organizations.push(identity);
        }
    }

    organizations
}

/// Map user-search hits to records as-is.
///
/// The org-search query already filters `type:org`, so every hit is kept,
/// duplicates included, in insertion order.
#[must_use]
pub fn records_from_hits(hits: Vec<OrgHit>) -> Vec<OrganizationRecord> {
    hits.into_iter().map(OrganizationRecord::from).collect()
}
