//! Helpers shared by the discovery commands.

use std::time::Duration;

use orgscout::github::PageFailure;
use orgscout::hiring::BROWSER_USER_AGENT;
use orgscout::{ErrorPolicy, ProbeOptions, SearchOptions, WebsiteFetchOptions};

use crate::CommonSearchOptions;
use crate::config::Config;

/// Merge CLI search flags with config defaults.
pub(crate) fn search_options(opts: &CommonSearchOptions, config: &Config) -> SearchOptions {
    let error_policy = if opts.fail_fast || config.search.fail_fast {
        ErrorPolicy::FailFast
    } else {
        ErrorPolicy::Skip
    };

    SearchOptions {
        per_page: opts.per_page.unwrap_or(config.search.per_page),
        start_page: opts.start_page.unwrap_or(config.search.start_page),
        max_pages: opts.max_pages.unwrap_or(config.search.max_pages),
        page_delay: Duration::from_millis(
            opts.page_delay_ms.unwrap_or(config.search.page_delay_ms),
        ),
        error_policy,
    }
}

/// Merge the timeout flag and config into website probing options.
pub(crate) fn probe_options(opts: &CommonSearchOptions, config: &Config) -> ProbeOptions {
    ProbeOptions {
        request_timeout: Duration::from_secs(
            opts.timeout_secs.unwrap_or(config.probe.timeout_secs),
        ),
        user_agent: config
            .probe
            .user_agent
            .clone()
            .unwrap_or_else(|| BROWSER_USER_AGENT.to_string()),
    }
}

/// Merge the concurrency and timeout flags with config defaults.
pub(crate) fn website_options(
    concurrency: Option<usize>,
    opts: &CommonSearchOptions,
    config: &Config,
) -> WebsiteFetchOptions {
    WebsiteFetchOptions {
        concurrency: concurrency.unwrap_or(config.probe.concurrency),
        request_timeout: Duration::from_secs(
            opts.timeout_secs.unwrap_or(config.probe.timeout_secs),
        ),
    }
}

/// Print a warning when running without a GitHub token.
pub(crate) fn warn_unauthenticated(is_tty: bool) {
    if is_tty {
        eprintln!("Warning: no GitHub token configured, search rate limits will be much lower\n");
    } else {
        tracing::warn!("No GitHub token configured, search rate limits will be much lower");
    }
}

/// Report pages that failed and were skipped during a run.
pub(crate) fn report_failures(failures: &[PageFailure], is_tty: bool) {
    if failures.is_empty() {
        return;
    }

    if is_tty {
        println!("Skipped {} failed page(s):", failures.len());
        for failure in failures {
            println!("  - page {}: {}", failure.page, failure.error);
        }
    } else {
        for failure in failures {
            tracing::warn!(page = failure.page, error = %failure.error, "Search page skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProbeConfig, SearchConfig};

    fn no_flags() -> CommonSearchOptions {
        CommonSearchOptions {
            per_page: None,
            start_page: None,
            max_pages: None,
            page_delay_ms: None,
            fail_fast: false,
            timeout_secs: None,
            output: None,
        }
    }

    #[test]
    fn search_options_fall_back_to_config() {
        let config = Config {
            search: SearchConfig {
                max_pages: 4,
                page_delay_ms: 500,
                ..SearchConfig::default()
            },
            ..Config::default()
        };

        let options = search_options(&no_flags(), &config);

        assert_eq!(options.per_page, 100);
        assert_eq!(options.max_pages, 4);
        assert_eq!(options.page_delay, Duration::from_millis(500));
        assert_eq!(options.error_policy, ErrorPolicy::Skip);
    }

    #[test]
    fn search_flags_override_config() {
        let config = Config {
            search: SearchConfig {
                max_pages: 4,
                ..SearchConfig::default()
            },
            ..Config::default()
        };

        let flags = CommonSearchOptions {
            max_pages: Some(9),
            page_delay_ms: Some(0),
            fail_fast: true,
            ..no_flags()
        };
        let options = search_options(&flags, &config);

        assert_eq!(options.max_pages, 9);
        assert_eq!(options.page_delay, Duration::ZERO);
        assert_eq!(options.error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn fail_fast_from_config_alone() {
        let config = Config {
            search: SearchConfig {
                fail_fast: true,
                ..SearchConfig::default()
            },
            ..Config::default()
        };

        let options = search_options(&no_flags(), &config);
        assert_eq!(options.error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn probe_options_use_browser_user_agent_by_default() {
        let options = probe_options(&no_flags(), &Config::default());

        assert_eq!(options.request_timeout, Duration::from_secs(15));
        assert_eq!(options.user_agent, BROWSER_USER_AGENT);
    }

    #[test]
    fn probe_user_agent_comes_from_config_when_set() {
        let config = Config {
            probe: ProbeConfig {
                user_agent: Some("orgscout-test".to_string()),
                ..ProbeConfig::default()
            },
            ..Config::default()
        };

        let options = probe_options(&no_flags(), &config);
        assert_eq!(options.user_agent, "orgscout-test");
    }

    #[test]
    fn website_options_merge_concurrency_flag() {
        let config = Config {
            probe: ProbeConfig {
                concurrency: 3,
                timeout_secs: 7,
                ..ProbeConfig::default()
            },
            ..Config::default()
        };

        let from_config = website_options(None, &no_flags(), &config);
        assert_eq!(from_config.concurrency, 3);
        assert_eq!(from_config.request_timeout, Duration::from_secs(7));

        let from_flag = website_options(Some(20), &no_flags(), &config);
        assert_eq!(from_flag.concurrency, 20);
    }
}
