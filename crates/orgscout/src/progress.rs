//! Progress reporting for discovery runs.
//!
//! Events describe the pipeline phases: paginated search, website probing
//! (topic path), and concurrent website resolution (org path). Consumers
//! register a [`ProgressCallback`]; the library never prints or renders
//! progress itself.

/// Progress events emitted during a discovery run.
///
/// Marked `#[non_exhaustive]` so new phases can add variants without
/// breaking consumers.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum DiscoveryProgress {
    /// A paginated search is starting for one query.
    ///
    /// `label` identifies the query segment (the topic, or the language in
    /// a multi-language run) and ties later page events to it.
    SearchStarted {
        label: String,
        start_page: u32,
        max_pages: u32,
    },

    /// One search page was fetched successfully.
    PageFetched {
        label: String,
        page: u32,
        /// Items on this page.
        count: usize,
        /// Total matches reported by the API for the whole query.
        total_count: u64,
        /// Items accumulated so far across pages of this run.
        total_so_far: usize,
    },

    /// One search page failed and was skipped.
    PageFailed {
        label: String,
        page: u32,
        error: String,
    },

    /// The paginated search for one query finished.
    SearchComplete { label: String, total: usize },

    /// Sequential website probing is starting (topic path).
    ProbingOrganizations { count: usize },

    /// One organization was probed for a hiring signal.
    OrganizationProbed {
        login: String,
        website: Option<String>,
        hiring: bool,
    },

    /// Website probing finished (topic path).
    ProbeComplete { hiring: usize, probed: usize },

    /// Concurrent website resolution is starting (org path).
    FetchingWebsites { count: usize, concurrency: usize },

    /// One organization's declared website was resolved (or failed soft).
    WebsiteResolved { api_url: String, found: bool },

    /// Concurrent website resolution finished (org path).
    WebsitesComplete { resolved: usize, total: usize },
}

/// Callback type for receiving progress events.
pub type ProgressCallback = Box<dyn Fn(DiscoveryProgress) + Send + Sync>;

/// Emit a progress event if a callback is registered.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: DiscoveryProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
