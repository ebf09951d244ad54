//! Discovery pipelines.
//!
//! Two entry points, one per discovery path. Both take option structs and
//! return reports instead of printing or writing files; CSV export is a
//! separate explicit step (see [`crate::export`]).

use tracing::info;

use crate::extract::{self, OrganizationRecord};
use crate::github::{
    GitHubClient, PageFailure, Result, SearchOptions, org_criteria_query,
    search_organization_pages, search_repository_pages, topic_query,
};
use crate::hiring::WebsiteProber;
use crate::progress::{DiscoveryProgress, ProgressCallback, emit};
use crate::website::{WebsiteFetchOptions, fetch_declared_websites};

/// Options for the topic discovery pipeline.
#[derive(Debug, Clone)]
pub struct TopicOptions {
    /// Repository topic to search for.
    pub topic: String,
    pub search: SearchOptions,
}

impl TopicOptions {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            search: SearchOptions::default(),
        }
    }
}

/// Options for the org-search discovery pipeline.
#[derive(Debug, Clone)]
pub struct OrgSearchOptions {
    /// Languages to search; the full page loop runs once per language.
    pub languages: Vec<String>,
    pub min_followers: u32,
    pub max_followers: u32,
    pub search: SearchOptions,
    pub websites: WebsiteFetchOptions,
}

impl Default for OrgSearchOptions {
    fn default() -> Self {
        Self {
            languages: vec!["typescript".to_string()],
            min_followers: 100,
            max_followers: 5000,
            search: SearchOptions::default(),
            websites: WebsiteFetchOptions::default(),
        }
    }
}

/// Result of a topic discovery run.
#[derive(Debug, Default)]
pub struct TopicReport {
    /// Organizations with a positive hiring signal, first-seen order.
    pub hiring: Vec<OrganizationRecord>,
    /// Distinct organizations extracted from the search, before probing.
    pub organizations_found: usize,
    pub pages_fetched: u32,
    pub failures: Vec<PageFailure>,
    /// Total matches reported by the API, when a page succeeded.
    pub total_count: Option<u64>,
}

/// Result of an org-search discovery run.
#[derive(Debug, Default)]
pub struct OrgSearchReport {
    /// One record per search hit, hit order, websites resolved.
    pub organizations: Vec<OrganizationRecord>,
    pub pages_fetched: u32,
    pub failures: Vec<PageFailure>,
    /// API-reported match totals per language.
    pub totals: Vec<(String, u64)>,
}

/// Discover organizations that are hiring, starting from a repository topic.
///
/// Searches repositories by topic, extracts distinct organization owners,
/// probes each declared website sequentially, and keeps only the
/// organizations whose website carries a hiring signal.
pub async fn discover_hiring_organizations(
    client: &GitHubClient,
    prober: &WebsiteProber,
    options: &TopicOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<TopicReport> {
    let query = topic_query(&options.topic);
    let outcome =
        search_repository_pages(client, &query, &options.topic, &options.search, on_progress)
            .await?;

    let identities = extract::organizations_from_repos(&outcome.items);
    info!(
        organizations = identities.len(),
        items = outcome.items.len(),
        "extracted distinct organizations"
    );

    emit(
        on_progress,
        DiscoveryProgress::ProbingOrganizations {
            count: identities.len(),
        },
    );

    let organizations_found = identities.len();
    let mut hiring = Vec::new();
    let mut probed = 0usize;

    for identity in identities {
        let probe = prober.probe_org(client, &identity.api_url).await;
        probed += 1;
        emit(
            on_progress,
            DiscoveryProgress::OrganizationProbed {
                login: identity.login.clone(),
                website: probe.website.clone(),
                hiring: probe.hiring,
            },
        );

        if probe.hiring {
            let mut record = OrganizationRecord::from(identity);
            record.declared_website = probe.website;
            record.has_hiring_signal = Some(true);
            hiring.push(record);
        }
    }

    emit(
        on_progress,
        DiscoveryProgress::ProbeComplete {
            hiring: hiring.len(),
            probed,
        },
    );

    Ok(TopicReport {
        hiring,
        organizations_found,
        pages_fetched: outcome.pages_fetched,
        failures: outcome.failures,
        total_count: outcome.total_count,
    })
}

/// Discover organizations matching follower and language criteria.
///
/// Runs one paginated user search per language, keeps every hit in order
/// (duplicates across languages included), then resolves each declared
/// website through the bounded concurrent fetch.
pub async fn discover_organizations(
    client: &GitHubClient,
    options: &OrgSearchOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<OrgSearchReport> {
    let mut report = OrgSearchReport::default();
    let mut hits = Vec::new();

    for language in &options.languages {
        let query = org_criteria_query(language, options.min_followers, options.max_followers);
        let outcome =
            search_organization_pages(client, &query, language, &options.search, on_progress)
                .await?;

        if let Some(total) = outcome.total_count {
            info!(language = %language, total, "search total reported");
            report.totals.push((language.clone(), total));
        }
        report.pages_fetched += outcome.pages_fetched;
        report.failures.extend(outcome.failures);
        hits.extend(outcome.items);
    }

    let mut records = extract::records_from_hits(hits);
    let api_urls: Vec<String> = records.iter().map(|r| r.api_url.clone()).collect();
    let websites = fetch_declared_websites(client, &api_urls, &options.websites, on_progress).await;

    for (record, website) in records.iter_mut().zip(websites) {
        record.declared_website = Some(website);
    }

    Ok(OrgSearchReport {
        organizations: records,
        ..report
    })
}
