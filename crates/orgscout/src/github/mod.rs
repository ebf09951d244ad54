//! GitHub API access: client, wire types, errors, and paginated search.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Wire types for search pages and organization profiles
//! - [`client`] - The transport-backed API client
//! - [`search`] - The paginated search loop and its options

mod client;
mod error;
mod search;
mod types;

// Re-export error types
pub use error::{GitHubError, Result, short_error_message};

// Re-export wire types
pub use types::{OrgHit, OrgProfile, RepoItem, RepoOwner, SearchPage};

// Re-export client
pub use client::{GITHUB_API_URL, GitHubClient, MAX_PER_PAGE};

// Re-export search machinery
pub use search::{
    ErrorPolicy, PageFailure, SearchOptions, SearchOutcome, org_criteria_query,
    search_organization_pages, search_repository_pages, topic_query,
};
