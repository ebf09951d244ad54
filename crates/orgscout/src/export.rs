//! CSV export of discovery results.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::extract::OrganizationRecord;

/// Query suffix appended to github links in the three-column layout.
///
/// Pre-filters the organization's repository listing the way the export
/// consumers browse it.
pub const GITHUB_LINK_SUFFIX: &str = "?q=&type=all&language=typescript&sort=stargazers";

/// Default output file for the topic path.
pub const DEFAULT_HIRING_CSV: &str = "Organizations.csv";

/// Default output file for the org-search path.
pub const DEFAULT_ORGS_CSV: &str = "Organizations_v2.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Header order `Organization, Github`.
#[derive(Debug, Serialize)]
struct HiringRow<'a> {
    #[serde(rename = "Organization")]
    organization: &'a str,
    #[serde(rename = "Github")]
    github: &'a str,
}

/// Header order `name, github, website`.
#[derive(Debug, Serialize)]
struct OrganizationRow<'a> {
    name: &'a str,
    github: String,
    website: &'a str,
}

/// Link to an organization's repository listing with the fixed filter
/// suffix applied.
#[must_use]
pub fn repos_search_link(html_url: &str) -> String {
    format!("{html_url}{GITHUB_LINK_SUFFIX}")
}

/// Write topic-path results as `[Organization, Github]`.
///
/// Overwrites `path` if it exists. The github column carries the profile
/// link as-is, without the filter suffix.
pub fn write_hiring_csv(path: impl AsRef<Path>, records: &[OrganizationRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    if records.is_empty() {
        writer.write_record(["Organization", "Github"])?;
    }
    for record in records {
        writer.serialize(HiringRow {
            organization: &record.login,
            github: &record.html_url,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write org-search results as `[name, github, website]`.
///
/// Overwrites `path` if it exists. Every github link carries the fixed
/// filter suffix; a missing website becomes an empty cell.
pub fn write_organizations_csv(
    path: impl AsRef<Path>,
    records: &[OrganizationRecord],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    if records.is_empty() {
        writer.write_record(["name", "github", "website"])?;
    }
    for record in records {
        writer.serialize(OrganizationRow {
            name: &record.login,
            github: repos_search_link(&record.html_url),
            website: record.declared_website.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush()?;
    Ok(())
}
