//! Progress reporting for discovery runs.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): Animated progress bars using indicatif
//! - Logging mode (non-TTY): Structured logging using tracing
//!
//! Progress bars are organized as:
//! - Search bar(s): One per query label, showing page fetching progress
//! - Probe bar: Single bar for sequential website probing
//! - Website bar: Single bar for concurrent website resolution

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use orgscout::{DiscoveryProgress, ProgressCallback};

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress bars for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: DiscoveryProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Finish all progress bars (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Consolidated progress state under a single lock.
#[derive(Default)]
struct ProgressState {
    /// Search progress bars by query label (the topic, or a language).
    search_bars: HashMap<String, ProgressBar>,
    /// Single bar for sequential website probing.
    probe_bar: Option<ProgressBar>,
    /// Single bar for concurrent website resolution.
    website_bar: Option<ProgressBar>,
}

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    /// Create a new interactive reporter.
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: DiscoveryProgress) {
        let mut state = self.state.lock().unwrap();

        match event {
            DiscoveryProgress::SearchStarted {
                label,
                start_page,
                max_pages,
            } => {
                let pb = self.multi.add(ProgressBar::new(max_pages as u64));
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{:12}", label));
                let msg = if start_page > 1 {
                    format!("Searching from page {}...", start_page)
                } else {
                    "Searching...".to_string()
                };
                pb.set_message(msg);
                state.search_bars.insert(label, pb);
            }

            DiscoveryProgress::PageFetched {
                label,
                page,
                count: _,
                total_count,
                total_so_far,
            } => {
                if let Some(pb) = state.search_bars.get(&label) {
                    pb.inc(1);
                    pb.set_message(format!(
                        "Page {} ({}/{} results)",
                        page, total_so_far, total_count
                    ));
                }
            }

            DiscoveryProgress::PageFailed { label, page, error } => {
                if let Some(pb) = state.search_bars.get(&label) {
                    pb.inc(1);
                    pb.set_message(format!("✗ page {}: {}", page, error));
                }
            }

            DiscoveryProgress::SearchComplete { label, total } => {
                if let Some(pb) = state.search_bars.get(&label) {
                    pb.finish_with_message(format!("✓ {} results", total));
                }
            }

            DiscoveryProgress::ProbingOrganizations { count } => {
                let pb = self.multi.add(ProgressBar::new(count as u64));
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{:12}", "Probing"));
                pb.set_message("Checking websites for hiring pages...");
                state.probe_bar = Some(pb);
            }

            DiscoveryProgress::OrganizationProbed {
                login,
                website: _,
                hiring,
            } => {
                if let Some(ref pb) = state.probe_bar {
                    pb.inc(1);
                    let symbol = if hiring { "★" } else { "·" };
                    pb.set_message(format!("{} {}", symbol, login));
                }
            }

            DiscoveryProgress::ProbeComplete { hiring, probed } => {
                if let Some(ref pb) = state.probe_bar {
                    pb.finish_with_message(format!("✓ {} hiring of {} probed", hiring, probed));
                }
            }

            DiscoveryProgress::FetchingWebsites {
                count,
                concurrency: _,
            } => {
                let pb = self.multi.add(ProgressBar::new(count as u64));
                pb.set_style(Self::bar_style());
                pb.set_prefix(format!("{:12}", "Websites"));
                pb.set_message("Resolving declared websites...");
                state.website_bar = Some(pb);
            }

            DiscoveryProgress::WebsiteResolved { api_url, found } => {
                if let Some(ref pb) = state.website_bar {
                    pb.inc(1);
                    let symbol = if found { "✓" } else { "·" };
                    let login = api_url.rsplit('/').next().unwrap_or(&api_url);
                    pb.set_message(format!("{} {}", symbol, login));
                }
            }

            DiscoveryProgress::WebsitesComplete { resolved, total } => {
                if let Some(ref pb) = state.website_bar {
                    pb.finish_with_message(format!("✓ {}/{} websites found", resolved, total));
                }
            }

            _ => {}
        }
    }

    /// Finish all progress bars.
    pub fn finish(&self) {
        let state = self.state.lock().unwrap();
        for pb in state.search_bars.values() {
            if !pb.is_finished() {
                pb.finish();
            }
        }
        if let Some(ref pb) = state.probe_bar
            && !pb.is_finished()
        {
            pb.finish();
        }
        if let Some(ref pb) = state.website_bar
            && !pb.is_finished()
        {
            pb.finish();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    /// Create a new logging reporter.
    pub fn new() -> Self {
        Self
    }

    /// Handle a progress event.
    pub fn handle(&self, event: DiscoveryProgress) {
        match event {
            DiscoveryProgress::SearchStarted {
                label,
                start_page,
                max_pages,
            } => {
                tracing::info!(label = %label, start_page, max_pages, "Searching");
            }

            DiscoveryProgress::PageFetched {
                label,
                page,
                count,
                total_count,
                total_so_far,
            } => {
                tracing::debug!(label = %label, page, count, total_count, total_so_far, "Fetched page");
            }

            DiscoveryProgress::PageFailed { label, page, error } => {
                tracing::warn!(label = %label, page, error = %error, "Search page failed, skipping");
            }

            DiscoveryProgress::SearchComplete { label, total } => {
                tracing::info!(label = %label, total, "Search complete");
            }

            DiscoveryProgress::ProbingOrganizations { count } => {
                tracing::info!(count, "Probing organization websites");
            }

            DiscoveryProgress::OrganizationProbed {
                login,
                website,
                hiring,
            } => {
                if hiring {
                    tracing::info!(login = %login, website = ?website, "Hiring signal found");
                } else {
                    tracing::debug!(login = %login, "No hiring signal");
                }
            }

            DiscoveryProgress::ProbeComplete { hiring, probed } => {
                tracing::info!(hiring, probed, "Probing complete");
            }

            DiscoveryProgress::FetchingWebsites { count, concurrency } => {
                tracing::info!(count, concurrency, "Resolving declared websites");
            }

            DiscoveryProgress::WebsiteResolved { api_url, found } => {
                tracing::debug!(api_url = %api_url, found, "Website resolved");
            }

            DiscoveryProgress::WebsitesComplete { resolved, total } => {
                tracing::info!(resolved, total, "Website resolution complete");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
