//! Discover GitHub organizations and probe their websites for hiring
//! signals.
//!
//! Two discovery paths share one pipeline core:
//!
//! - the topic path searches repositories by topic, extracts the distinct
//!   organization owners, and keeps those whose declared website links to
//!   hiring-related content;
//! - the org-search path searches organizations by follower count and
//!   primary language, then resolves each declared website through a
//!   bounded concurrent fetch.
//!
//! Both paths return reports; writing CSV output is a separate explicit
//! step in [`export`].
//!
//! # Example
//!
//! ```ignore
//! use orgscout::{GitHubClient, ProbeOptions, TopicOptions, WebsiteProber};
//!
//! let client = GitHubClient::new(Some(token))?;
//! let prober = WebsiteProber::new(ProbeOptions::default())?;
//!
//! let report = orgscout::discover_hiring_organizations(
//!     &client,
//!     &prober,
//!     &TopicOptions::new("typescript"),
//!     None,
//! )
//! .await?;
//!
//! orgscout::export::write_hiring_csv("Organizations.csv", &report.hiring)?;
//! ```

pub mod export;
pub mod extract;
pub mod github;
pub mod hiring;
pub mod http;
pub mod pipeline;
pub mod progress;
pub mod website;

pub use export::ExportError;
pub use extract::{OrgIdentity, OrganizationRecord};
pub use github::{ErrorPolicy, GitHubClient, GitHubError, SearchOptions, SearchOutcome};
pub use hiring::{ProbeOptions, WebsiteProber};
pub use http::{HttpError, HttpRequest, HttpResponse, HttpTransport, header_get};
pub use pipeline::{
    OrgSearchOptions, OrgSearchReport, TopicOptions, TopicReport,
    discover_hiring_organizations, discover_organizations,
};
pub use progress::{DiscoveryProgress, ProgressCallback};
pub use website::WebsiteFetchOptions;
