//! Declared-website resolution for discovered organizations.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::github::GitHubClient;
use crate::progress::{DiscoveryProgress, ProgressCallback, emit};

/// Options for the concurrent website fetch.
#[derive(Debug, Clone)]
pub struct WebsiteFetchOptions {
    /// Maximum number of profile requests in flight at once.
    pub concurrency: usize,
    /// Deadline per profile request; exceeding it reads as "no website".
    pub request_timeout: Duration,
}

impl Default for WebsiteFetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 10,
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Prefix `https://` unless the value already carries an explicit scheme.
///
/// Profile websites are frequently entered as bare domains
/// (`acme.dev`, `www.acme.dev/jobs`); everything else passes through
/// unchanged.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// Resolve each organization's declared website from its profile.
///
/// Fetches profiles concurrently through the shared client. Uses a
/// semaphore to limit concurrency and a per-request timeout so a hung
/// request cannot stall the batch. The returned vector matches `api_urls`
/// in length and order, with an empty string wherever the lookup failed,
/// timed out, or the profile declares no website.
pub async fn fetch_declared_websites(
    client: &GitHubClient,
    api_urls: &[String],
    options: &WebsiteFetchOptions,
    on_progress: Option<&ProgressCallback>,
) -> Vec<String> {
    if api_urls.is_empty() {
        return Vec::new();
    }

    let concurrency = std::cmp::max(1, std::cmp::min(options.concurrency, api_urls.len()));
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let request_timeout = options.request_timeout;

    emit(
        on_progress,
        DiscoveryProgress::FetchingWebsites {
            count: api_urls.len(),
            concurrency,
        },
    );

    let mut handles = Vec::with_capacity(api_urls.len());

    for api_url in api_urls {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let api_url = api_url.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return (api_url, String::new()),
            };

            let website =
                match tokio::time::timeout(request_timeout, client.org_profile(&api_url)).await {
                    Ok(Ok(profile)) => profile.blog.unwrap_or_default(),
                    Ok(Err(e)) => {
                        debug!(url = %api_url, error = %e, "website lookup failed");
                        String::new()
                    }
                    Err(_) => {
                        debug!(url = %api_url, ?request_timeout, "website lookup timed out");
                        String::new()
                    }
                };

            (api_url, website)
        });

        handles.push(handle);
    }

    let mut websites = Vec::with_capacity(handles.len());
    let mut resolved = 0usize;

    for handle in handles {
        match handle.await {
            Ok((api_url, website)) => {
                let found = !website.is_empty();
                if found {
                    resolved += 1;
                }
                emit(
                    on_progress,
                    DiscoveryProgress::WebsiteResolved { api_url, found },
                );
                websites.push(website);
            }
            Err(e) => {
                warn!(error = %e, "website lookup task failed");
                websites.push(String::new());
            }
        }
    }

    emit(
        on_progress,
        DiscoveryProgress::WebsitesComplete {
            resolved,
            total: websites.len(),
        },
    );

    websites
}
