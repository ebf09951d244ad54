//! Orgscout CLI - command-line interface for the organization discovery tool.

mod commands;
mod config;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orgscout")]
#[command(version)]
#[command(about = "Discover GitHub organizations worth talking to")]
#[command(
    long_about = "Orgscout searches GitHub for organizations, either through the repositories \
they publish under a topic or directly by follower count and language. It can \
probe each organization's declared website for hiring pages and exports the \
results as CSV."
)]
#[command(after_long_help = r#"EXAMPLES
    Find organizations with typescript repos whose websites mention hiring:
        $ orgscout topic typescript

    The same search across three pages of results:
        $ orgscout topic typescript --max-pages 3

    Find mid-sized organizations by follower range and language:
        $ orgscout orgs --min-followers 100 --max-followers 5000

    Search two languages and write to a custom file:
        $ orgscout orgs -l typescript -l rust --output orgs.csv

CONFIGURATION
    Orgscout reads configuration from:
      1. ~/.config/orgscout/config.toml (or $XDG_CONFIG_HOME/orgscout/config.toml)
      2. ./orgscout.toml in the current directory
      3. Environment variables (ORGSCOUT_* prefix, e.g., ORGSCOUT_GITHUB_TOKEN)
      4. .env file in the current directory

ENVIRONMENT VARIABLES
    ORGSCOUT_GITHUB_TOKEN     GitHub personal access token
    GITHUB_TOKEN              Fallback token variable, honored because most
                              shells and CI setups already export it
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find hiring organizations through the repositories they publish under a topic
    Topic {
        /// Repository topic to search for (e.g., "typescript")
        topic: String,

        #[command(flatten)]
        search_opts: CommonSearchOptions,
    },
    /// Find organizations by follower range and language
    Orgs {
        #[command(flatten)]
        orgs_opts: OrgsOptions,

        #[command(flatten)]
        search_opts: CommonSearchOptions,
    },
}

/// Search options shared by both discovery commands.
#[derive(Debug, Clone, clap::Args)]
struct CommonSearchOptions {
    /// Results per page, capped at 100 by the API (default from config or 100)
    #[arg(long)]
    per_page: Option<u32>,

    /// First result page to fetch (default from config or 1)
    #[arg(long)]
    start_page: Option<u32>,

    /// Maximum number of pages to fetch per query (default from config or 1)
    #[arg(short = 'p', long)]
    max_pages: Option<u32>,

    /// Delay before each page request, in milliseconds (default from config or 1000)
    #[arg(long)]
    page_delay_ms: Option<u64>,

    /// Abort on the first failed page instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Per-request timeout in seconds for profile and website fetches (default from config or 15)
    #[arg(short = 't', long)]
    timeout_secs: Option<u64>,

    /// Output CSV path (defaults to Organizations.csv / Organizations_v2.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Options specific to the org-search command.
#[derive(Debug, Clone, clap::Args)]
struct OrgsOptions {
    /// Language(s) to filter organizations by - can specify multiple
    #[arg(short = 'l', long = "language", default_value = "typescript")]
    languages: Vec<String>,

    /// Minimum organization follower count
    #[arg(long, default_value_t = 100)]
    min_followers: u32,

    /// Maximum organization follower count
    #[arg(long, default_value_t = 5000)]
    max_followers: u32,

    /// Maximum concurrent profile requests (default from config or 10)
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing for non-TTY mode (structured logging)
    // Only initialize if not connected to a TTY
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("orgscout=info,orgscout_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    match cli.command {
        Commands::Topic { topic, search_opts } => {
            commands::topic::handle_topic(topic, search_opts, &config).await?;
        }
        Commands::Orgs {
            orgs_opts,
            search_opts,
        } => {
            commands::orgs::handle_orgs(orgs_opts, search_opts, &config).await?;
        }
    }

    Ok(())
}
