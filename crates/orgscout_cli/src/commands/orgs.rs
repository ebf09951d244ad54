//! Org-search discovery command: search organizations by follower range and
//! language, resolve their declared websites, and export one row per hit.

use std::path::PathBuf;
use std::sync::Arc;

use console::Term;

use orgscout::export::{self, DEFAULT_ORGS_CSV};
use orgscout::{GitHubClient, OrgSearchOptions, discover_organizations};

use crate::commands::shared::{
    report_failures, search_options, warn_unauthenticated, website_options,
};
use crate::config::Config;
use crate::progress::ProgressReporter;
use crate::{CommonSearchOptions, OrgsOptions};

pub(crate) async fn handle_orgs(
    orgs_opts: OrgsOptions,
    search_opts: CommonSearchOptions,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let is_tty = Term::stdout().is_term();

    let token = config.github_token();
    if token.is_none() {
        warn_unauthenticated(is_tty);
    }
    let client = GitHubClient::new(token)?;

    let options = OrgSearchOptions {
        languages: orgs_opts.languages,
        min_followers: orgs_opts.min_followers,
        max_followers: orgs_opts.max_followers,
        search: search_options(&search_opts, config),
        websites: website_options(orgs_opts.concurrency, &search_opts, config),
    };

    let reporter = Arc::new(ProgressReporter::new());
    let progress = reporter.as_callback();

    let report = discover_organizations(&client, &options, Some(&progress)).await?;

    reporter.finish();

    if is_tty {
        println!(
            "\nDiscovery complete: fetched {} pages, found {} organizations",
            report.pages_fetched,
            report.organizations.len()
        );
        for (language, total) in &report.totals {
            println!("  {}: {} matching organizations on GitHub", language, total);
        }
    } else {
        tracing::info!(
            pages_fetched = report.pages_fetched,
            organizations = report.organizations.len(),
            totals = ?report.totals,
            "Discovery complete"
        );
    }

    report_failures(&report.failures, is_tty);

    let output = search_opts
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ORGS_CSV));
    export::write_organizations_csv(&output, &report.organizations)?;

    if is_tty {
        println!(
            "Wrote {} organizations to {}",
            report.organizations.len(),
            output.display()
        );
    } else {
        tracing::info!(
            organizations = report.organizations.len(),
            path = %output.display(),
            "Wrote CSV"
        );
    }

    Ok(())
}
