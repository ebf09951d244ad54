//! Paginated search over the GitHub search endpoints.
//!
//! One GET per page, a fixed delay ahead of each request, and a stop as
//! soon as a page comes back short (fewer items than `per_page`), which
//! signals the last page without spending an extra request. Failed pages
//! are handled according to the configured [`ErrorPolicy`].

use std::future::Future;
use std::time::Duration;

use super::client::{GitHubClient, MAX_PER_PAGE};
use super::error::{Result, short_error_message};
use super::types::{OrgHit, RepoItem, SearchPage};
use crate::progress::{DiscoveryProgress, ProgressCallback, emit};

/// How the page loop reacts to a failed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Record the failure and continue with the next page.
    #[default]
    Skip,
    /// Abort the search on the first failed page.
    FailFast,
}

/// Options for a paginated search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Items requested per page; the API caps this at 100.
    pub per_page: u32,
    /// First page to request (pages are 1-based).
    pub start_page: u32,
    /// Number of pages to request at most, starting at `start_page`.
    pub max_pages: u32,
    /// Pause ahead of each page request. `Duration::ZERO` disables it.
    pub page_delay: Duration,
    /// Reaction to failed pages.
    pub error_policy: ErrorPolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            start_page: 1,
            max_pages: 1,
            page_delay: Duration::from_secs(1),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl SearchOptions {
    /// The per-page value after applying the API cap.
    #[must_use]
    pub fn effective_per_page(&self) -> u32 {
        self.per_page.min(MAX_PER_PAGE)
    }
}

/// A search page that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: u32,
    pub error: String,
}

/// Accumulated result of a paginated search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    /// Items from all successfully fetched pages, in page order.
    pub items: Vec<T>,
    /// Total matches reported by the API, from the first successful page.
    pub total_count: Option<u64>,
    /// Pages fetched successfully.
    pub pages_fetched: u32,
    /// Pages that failed under [`ErrorPolicy::Skip`].
    pub failures: Vec<PageFailure>,
}

impl<T> Default for SearchOutcome<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: None,
            pages_fetched: 0,
            failures: Vec::new(),
        }
    }
}

/// Build the repository search expression for a topic.
#[must_use]
pub fn topic_query(topic: &str) -> String {
    format!("topic:{topic}")
}

/// Build the user search expression for organization criteria.
#[must_use]
pub fn org_criteria_query(language: &str, min_followers: u32, max_followers: u32) -> String {
    format!("type:org followers:{min_followers}..{max_followers} language:{language}")
}

/// Run a paginated repository search.
pub async fn search_repository_pages(
    client: &GitHubClient,
    query: &str,
    label: &str,
    options: &SearchOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SearchOutcome<RepoItem>> {
    fetch_pages(
        |page| client.search_repositories(query, options.per_page, page),
        label,
        options,
        on_progress,
    )
    .await
}

/// Run a paginated user/organization search.
pub async fn search_organization_pages(
    client: &GitHubClient,
    query: &str,
    label: &str,
    options: &SearchOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SearchOutcome<OrgHit>> {
    fetch_pages(
        |page| client.search_users(query, options.per_page, page),
        label,
        options,
        on_progress,
    )
    .await
}

async fn fetch_pages<T, F, Fut>(
    fetch_page: F,
    label: &str,
    options: &SearchOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SearchOutcome<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<SearchPage<T>>>,
{
    let per_page = options.effective_per_page() as usize;
    let end_page = options.start_page.saturating_add(options.max_pages);
    let mut outcome = SearchOutcome::default();

    emit(
        on_progress,
        DiscoveryProgress::SearchStarted {
            label: label.to_string(),
            start_page: options.start_page,
            max_pages: options.max_pages,
        },
    );

    for page in options.start_page..end_page {
        if !options.page_delay.is_zero() {
            tokio::time::sleep(options.page_delay).await;
        }

        match fetch_page(page).await {
            Ok(page_data) => {
                let count = page_data.items.len();
                outcome.pages_fetched += 1;
                if outcome.total_count.is_none() {
                    outcome.total_count = Some(page_data.total_count);
                }
                outcome.items.extend(page_data.items);

                tracing::debug!(label, page, count, "fetched search page");
                emit(
                    on_progress,
                    DiscoveryProgress::PageFetched {
                        label: label.to_string(),
                        page,
                        count,
                        total_count: page_data.total_count,
                        total_so_far: outcome.items.len(),
                    },
                );

                // A short page is the last page; skip the extra request.
                if count < per_page {
                    break;
                }
            }
            Err(e) => match options.error_policy {
                ErrorPolicy::FailFast => return Err(e),
                ErrorPolicy::Skip => {
                    let error = short_error_message(&e);
                    tracing::warn!(label, page, error = %error, "skipping failed search page");
                    emit(
                        on_progress,
                        DiscoveryProgress::PageFailed {
                            label: label.to_string(),
                            page,
                            error: error.clone(),
                        },
                    );
                    outcome.failures.push(PageFailure { page, error });
                }
            },
        }
    }

    emit(
        on_progress,
        DiscoveryProgress::SearchComplete {
            label: label.to_string(),
            total: outcome.items.len(),
        },
    );

    Ok(outcome)
}
