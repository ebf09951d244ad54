//! Configuration file support for orgscout.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `ORGSCOUT_`, e.g., `ORGSCOUT_GITHUB_TOKEN`)
//! 3. Config file (~/.config/orgscout/config.toml or ./orgscout.toml)
//! 4. Built-in defaults
//!
//! The GitHub token additionally falls back to the plain `GITHUB_TOKEN`
//! environment variable, which most shells and CI setups already export.
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use ORGSCOUT_GITHUB_TOKEN / GITHUB_TOKEN env vars
//!
//! [search]
//! per_page = 100
//! start_page = 1
//! max_pages = 1
//! page_delay_ms = 1000
//! fail_fast = false
//!
//! [probe]
//! concurrency = 10
//! timeout_secs = 15
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Default search options.
    pub search: SearchConfig,
    /// Default website probing options.
    pub probe: ProbeConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token. Searches run unauthenticated without one, at
    /// much lower rate limits.
    /// Can also be set via ORGSCOUT_GITHUB_TOKEN or GITHUB_TOKEN.
    pub token: Option<String>,
}

/// Default search options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results requested per search page; the API caps this at 100.
    pub per_page: u32,
    /// First page to request (pages are 1-based).
    pub start_page: u32,
    /// Maximum number of pages to fetch per query.
    pub max_pages: u32,
    /// Pause before each page request, in milliseconds.
    pub page_delay_ms: u64,
    /// Abort on the first failed page instead of skipping it.
    pub fail_fast: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: 100,
            start_page: 1,
            max_pages: 1,
            page_delay_ms: 1000,
            fail_fast: false,
        }
    }
}

/// Default website probing options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Maximum concurrent profile requests when resolving websites.
    pub concurrency: usize,
    /// Per-request timeout in seconds for profile and website fetches.
    pub timeout_secs: u64,
    /// User-Agent sent to organization websites (not to the GitHub API).
    /// Defaults to a desktop browser string.
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            timeout_secs: 15,
            user_agent: None,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/orgscout/config.toml)
    /// 3. Local config file (./orgscout.toml)
    /// 4. Environment variables with ORGSCOUT_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        // Add XDG config file if it exists
        if let Some(proj_dirs) = ProjectDirs::from("", "", "orgscout") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Add local config file (higher priority than XDG)
        let local_config = PathBuf::from("orgscout.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./orgscout.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // Add ORGSCOUT_ prefixed environment variables
        // e.g., ORGSCOUT_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("ORGSCOUT")
                .separator("_")
                .try_parsing(true),
        );

        // Build the config and deserialize
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token, falling back to the plain `GITHUB_TOKEN`
    /// environment variable. Empty values count as absent.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.is_empty())
    }
}
