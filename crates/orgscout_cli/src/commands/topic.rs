//! Topic discovery command: search repositories by topic, probe the owning
//! organizations' websites, and export the ones with hiring pages.

use std::path::PathBuf;
use std::sync::Arc;

use console::Term;

use orgscout::export::{self, DEFAULT_HIRING_CSV};
use orgscout::{GitHubClient, TopicOptions, WebsiteProber, discover_hiring_organizations};

use crate::CommonSearchOptions;
use crate::commands::shared::{
    probe_options, report_failures, search_options, warn_unauthenticated,
};
use crate::config::Config;
use crate::progress::ProgressReporter;

pub(crate) async fn handle_topic(
    topic: String,
    search_opts: CommonSearchOptions,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let is_tty = Term::stdout().is_term();

    let token = config.github_token();
    if token.is_none() {
        warn_unauthenticated(is_tty);
    }
    let client = GitHubClient::new(token)?;
    let prober = WebsiteProber::new(probe_options(&search_opts, config))?;

    let options = TopicOptions {
        topic,
        search: search_options(&search_opts, config),
    };

    let reporter = Arc::new(ProgressReporter::new());
    let progress = reporter.as_callback();

    let report =
        discover_hiring_organizations(&client, &prober, &options, Some(&progress)).await?;

    reporter.finish();

    if is_tty {
        println!(
            "\nDiscovery complete: fetched {} pages, found {} organizations, {} hiring",
            report.pages_fetched,
            report.organizations_found,
            report.hiring.len()
        );
        if let Some(total) = report.total_count {
            println!("  {} repositories matched on GitHub", total);
        }
    } else {
        tracing::info!(
            pages_fetched = report.pages_fetched,
            organizations_found = report.organizations_found,
            hiring = report.hiring.len(),
            total_count = ?report.total_count,
            "Discovery complete"
        );
    }

    report_failures(&report.failures, is_tty);

    let output = search_opts
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HIRING_CSV));
    export::write_hiring_csv(&output, &report.hiring)?;

    if is_tty {
        println!(
            "Wrote {} organizations to {}",
            report.hiring.len(),
            output.display()
        );
    } else {
        tracing::info!(
            organizations = report.hiring.len(),
            path = %output.display(),
            "Wrote CSV"
        );
    }

    Ok(())
}
