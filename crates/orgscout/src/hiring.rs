//! Hiring-signal probing of organization websites.
//!
//! The topic path reads each organization's declared website from its
//! profile, fetches the site with a browser identity, and scans the
//! anchors for hiring-related keywords. Every failure along the way reads
//! as "no signal"; probing never errors.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::github::GitHubClient;
use crate::http::{HttpError, HttpRequest, HttpTransport, reqwest_transport::ReqwestTransport};
use crate::website::normalize_url;

/// Browser identity sent when fetching organization websites.
///
/// Some sites return bot-filtered responses to generic clients; a Chrome
/// User-Agent gets the same HTML a browser would.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

/// Keywords that mark an anchor href as hiring-related.
///
/// Case-sensitive: lowercase `career`/`job` match URL paths, `Hiring` and
/// `Join us` match call-to-action slugs echoed into hrefs.
const HIRING_PATTERN: &str = "career|job|Hiring|Join us";

/// Options for website probing.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Deadline per website request.
    pub request_timeout: StdDuration,
    /// Identity string sent to organization websites.
    pub user_agent: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            request_timeout: StdDuration::from_secs(15),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// What probing one organization produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The website declared on the profile, if any.
    pub website: Option<String>,
    /// Whether that website links to hiring-related content.
    pub hiring: bool,
}

/// Probes organization websites for hiring signals.
///
/// Carries its own transport so website requests use the browser identity
/// and timeout rather than the API client's settings.
pub struct WebsiteProber {
    transport: Arc<dyn HttpTransport>,
    options: ProbeOptions,
}

impl WebsiteProber {
    /// Create a prober with the default reqwest transport.
    pub fn new(options: ProbeOptions) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::with_timeout(options.request_timeout)?;
        Ok(Self::with_transport(Arc::new(transport), options))
    }

    /// Create a prober over an existing transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, options: ProbeOptions) -> Self {
        Self { transport, options }
    }

    /// Probe one organization for a hiring signal.
    ///
    /// Fetches the profile, reads the declared website, fetches that site,
    /// and scans it. A missing website, failed fetch, or signal-free page
    /// all produce a negative outcome rather than an error.
    pub async fn probe_org(&self, client: &GitHubClient, api_url: &str) -> ProbeOutcome {
        let profile = match client.org_profile(api_url).await {
            Ok(profile) => profile,
            Err(e) => {
                debug!(url = %api_url, error = %e, "profile fetch failed");
                return ProbeOutcome::default();
            }
        };

        let Some(declared) = profile.website() else {
            debug!(login = %profile.login, "no declared website");
            return ProbeOutcome::default();
        };
        let declared = declared.to_string();

        let hiring = self.website_has_hiring_link(&declared).await;
        ProbeOutcome {
            website: Some(declared),
            hiring,
        }
    }

    /// Fetch a declared website and scan it for hiring-related anchors.
    pub async fn website_has_hiring_link(&self, declared: &str) -> bool {
        let url = normalize_url(declared);
        let request = HttpRequest::new(
            &url,
            vec![("User-Agent".to_string(), self.options.user_agent.clone())],
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "website fetch failed");
                return false;
            }
        };

        if !response.is_success() {
            debug!(url = %url, status = response.status, "website returned non-success");
            return false;
        }

        let body = String::from_utf8_lossy(&response.body);
        html_has_hiring_link(&body)
    }
}

/// Whether any anchor href in `html` matches a hiring keyword.
#[must_use]
pub fn html_has_hiring_link(html: &str) -> bool {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("selector should parse");
    let pattern = Regex::new(HIRING_PATTERN).expect("pattern should compile");

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if pattern.is_match(href) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    #[test]
    fn hiring_link_matches_each_keyword_in_hrefs() {
        for href in [
            "/careers",
            "https://acme.dev/jobs/open",
            "/about?cta=Hiring",
            "/signup?ref=Join us",
        ] {
            let html = format!(r#"<html><body><a href="{href}">link</a></body></html>"#);
            assert!(html_has_hiring_link(&html), "expected match for {href}");
        }
    }

    #[test]
    fn hiring_link_ignores_unrelated_hrefs() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="/blog">Blog</a>
        </body></html>"#;
        assert!(!html_has_hiring_link(html));
    }

    #[test]
    fn hiring_link_matching_is_case_sensitive() {
        // Capitalized "Careers" misses the lowercase `career` keyword.
        assert!(!html_has_hiring_link(r#"<a href="/Careers">x</a>"#));
        // Lowercase "hiring" misses the capitalized `Hiring` keyword.
        assert!(!html_has_hiring_link(r#"<a href="/hiring">x</a>"#));
        // The exact capitalized form matches.
        assert!(html_has_hiring_link(r#"<a href="/Hiring">x</a>"#));
    }

    #[test]
    fn hiring_link_reads_hrefs_not_anchor_text() {
        let html = r#"<html><body><a href="/team">careers</a></body></html>"#;
        assert!(!html_has_hiring_link(html));
    }

    #[test]
    fn hiring_link_is_false_for_empty_or_anchorless_html() {
        assert!(!html_has_hiring_link(""));
        assert!(!html_has_hiring_link("<html><body><p>careers</p></body></html>"));
    }

    fn org_url(login: &str) -> String {
        format!("https://api.github.com/orgs/{login}")
    }

    #[tokio::test]
    async fn probe_reports_hiring_when_site_links_to_careers() {
        let api = MockTransport::new();
        api.push_json(
            &org_url("acme"),
            r#"{"login":"acme","html_url":"https://github.com/acme","blog":"acme.dev"}"#,
        );

        let web = MockTransport::new();
        web.push_response(
            "https://acme.dev",
            crate::http::HttpResponse {
                status: 200,
                headers: vec![("Content-Type".to_string(), "text/html".to_string())],
                body: br#"<html><body><a href="/careers">Work with us</a></body></html>"#.to_vec(),
            },
        );

        let client = GitHubClient::with_transport(Arc::new(api), None);
        let prober = WebsiteProber::with_transport(Arc::new(web.clone()), ProbeOptions::default());

        let outcome = prober.probe_org(&client, &org_url("acme")).await;
        assert_eq!(outcome.website.as_deref(), Some("acme.dev"));
        assert!(outcome.hiring);

        // The website request goes out with the browser identity, to the
        // normalized URL.
        let requests = web.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://acme.dev");
        assert_eq!(
            requests[0]
                .headers
                .iter()
                .find(|(k, _)| k == "User-Agent")
                .map(|(_, v)| v.as_str()),
            Some(BROWSER_USER_AGENT)
        );
    }

    #[tokio::test]
    async fn probe_without_declared_website_skips_the_site_fetch() {
        let api = MockTransport::new();
        api.push_json(
            &org_url("acme"),
            r#"{"login":"acme","html_url":"https://github.com/acme","blog":""}"#,
        );

        let web = MockTransport::new();
        let client = GitHubClient::with_transport(Arc::new(api), None);
        let prober = WebsiteProber::with_transport(Arc::new(web.clone()), ProbeOptions::default());

        let outcome = prober.probe_org(&client, &org_url("acme")).await;
        assert_eq!(outcome, ProbeOutcome::default());
        assert_eq!(web.request_count(), 0);
    }

    #[tokio::test]
    async fn probe_treats_profile_fetch_failure_as_no_signal() {
        let api = MockTransport::new();
        api.push_status(&org_url("acme"), 500);

        let client = GitHubClient::with_transport(Arc::new(api), None);
        let prober = WebsiteProber::with_transport(
            Arc::new(MockTransport::new()),
            ProbeOptions::default(),
        );

        let outcome = prober.probe_org(&client, &org_url("acme")).await;
        assert_eq!(outcome, ProbeOutcome::default());
    }

    #[tokio::test]
    async fn probe_keeps_website_but_no_signal_when_site_is_unreachable() {
        let api = MockTransport::new();
        api.push_json(
            &org_url("acme"),
            r#"{"login":"acme","html_url":"https://github.com/acme","blog":"https://acme.dev"}"#,
        );

        let web = MockTransport::new();
        web.push_status("https://acme.dev", 403);

        let client = GitHubClient::with_transport(Arc::new(api), None);
        let prober = WebsiteProber::with_transport(Arc::new(web), ProbeOptions::default());

        let outcome = prober.probe_org(&client, &org_url("acme")).await;
        assert_eq!(outcome.website.as_deref(), Some("https://acme.dev"));
        assert!(!outcome.hiring);
    }
}
