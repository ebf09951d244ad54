//! GitHub API client for search and profile requests.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::{GitHubError, Result};
use super::types::{OrgHit, OrgProfile, RepoItem, SearchPage};
use crate::http::{HttpHeaders, HttpRequest, HttpTransport, reqwest_transport::ReqwestTransport};

/// Default base URL for the GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Maximum `per_page` value the search API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// User-Agent sent with API requests; GitHub rejects requests without one.
const API_USER_AGENT: &str = "orgscout";

/// Timeout for API requests made through the default transport.
const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the GitHub REST API.
///
/// All requests go through an [`HttpTransport`], so tests can substitute a
/// mock. The base URL is configurable for GitHub Enterprise hosts and for
/// loopback test servers.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    /// Create a client with the default reqwest transport.
    ///
    /// A missing token is tolerated; requests are then unauthenticated and
    /// subject to the lower anonymous rate limit.
    pub fn new(token: Option<String>) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(API_REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(Arc::new(transport), token))
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, token: Option<String>) -> Self {
        Self {
            transport,
            token,
            base_url: GITHUB_API_URL.to_string(),
        }
    }

    /// Point the client at a different API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Search repositories, one page at a time.
    ///
    /// `query` is the raw search expression (e.g. `topic:typescript`).
    pub async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage<RepoItem>> {
        let url = self.search_url("repositories", query, per_page, page);
        self.get_json(&url).await
    }

    /// Search users and organizations, one page at a time.
    ///
    /// `query` is the raw search expression
    /// (e.g. `type:org followers:100..5000 language:typescript`).
    pub async fn search_users(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> Result<SearchPage<OrgHit>> {
        let url = self.search_url("users", query, per_page, page);
        self.get_json(&url).await
    }

    /// Fetch an organization profile from its API URL.
    ///
    /// Search results carry absolute profile URLs, so this takes the URL
    /// as-is rather than rebuilding it from the login.
    pub async fn org_profile(&self, api_url: &str) -> Result<OrgProfile> {
        self.get_json(api_url).await
    }

    fn search_url(&self, endpoint: &str, query: &str, per_page: u32, page: u32) -> String {
        format!(
            "{}/search/{}?q={}&per_page={}&page={}",
            self.base_url,
            endpoint,
            urlencoding::encode(query),
            per_page.min(MAX_PER_PAGE),
            page
        )
    }

    fn api_headers(&self) -> HttpHeaders {
        let mut headers: HttpHeaders = vec![
            (
                "Accept".to_string(),
                "application/vnd.github.v3+json".to_string(),
            ),
            ("User-Agent".to_string(), API_USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("token {token}")));
        }
        headers
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = HttpRequest::new(url, self.api_headers());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(GitHubError::api(
                response.status,
                String::from_utf8_lossy(&response.body).into_owned(),
            ));
        }

        serde_json::from_slice(&response.body).map_err(|e| GitHubError::json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockTransport, header_get};

    fn client_with(transport: &MockTransport, token: Option<&str>) -> GitHubClient {
        GitHubClient::with_transport(Arc::new(transport.clone()), token.map(String::from))
    }

    #[tokio::test]
    async fn search_repositories_builds_encoded_url_and_api_headers() {
        let transport = MockTransport::new();
        let url =
            "https://api.github.com/search/repositories?q=topic%3Atypescript&per_page=100&page=1";
        transport.push_json(url, r#"{"total_count":0,"items":[]}"#);

        let client = client_with(&transport, Some("t123"));
        let page = client
            .search_repositories("topic:typescript", 100, 1)
            .await
            .expect("search page");
        assert_eq!(page.total_count, 0);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, url);
        assert_eq!(
            header_get(&requests[0].headers, "accept"),
            Some("application/vnd.github.v3+json")
        );
        assert_eq!(header_get(&requests[0].headers, "user-agent"), Some("orgscout"));
        assert_eq!(
            header_get(&requests[0].headers, "authorization"),
            Some("token t123")
        );
    }

    #[tokio::test]
    async fn unauthenticated_client_omits_authorization_header() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/search/users?q=type%3Aorg&per_page=10&page=1",
            r#"{"total_count":0,"items":[]}"#,
        );

        let client = client_with(&transport, None);
        client.search_users("type:org", 10, 1).await.expect("page");

        let requests = transport.requests();
        assert_eq!(header_get(&requests[0].headers, "authorization"), None);
    }

    #[tokio::test]
    async fn search_query_with_spaces_is_percent_encoded() {
        let transport = MockTransport::new();
        let url = "https://api.github.com/search/users?q=type%3Aorg%20followers%3A100..5000%20language%3Atypescript&per_page=100&page=1";
        transport.push_json(url, r#"{"total_count":0,"items":[]}"#);

        let client = client_with(&transport, None);
        client
            .search_users("type:org followers:100..5000 language:typescript", 100, 1)
            .await
            .expect("page");

        assert_eq!(transport.requests()[0].url, url);
    }

    #[tokio::test]
    async fn per_page_is_clamped_to_api_maximum() {
        let transport = MockTransport::new();
        let url = "https://api.github.com/search/repositories?q=topic%3Ats&per_page=100&page=1";
        transport.push_json(url, r#"{"total_count":0,"items":[]}"#);

        let client = client_with(&transport, None);
        client
            .search_repositories("topic:ts", 250, 1)
            .await
            .expect("page");

        assert_eq!(transport.requests()[0].url, url);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let transport = MockTransport::new();
        transport.push_response(
            "https://api.github.com/search/repositories?q=topic%3Ats&per_page=100&page=1",
            crate::http::HttpResponse {
                status: 403,
                headers: Vec::new(),
                body: br#"{"message":"API rate limit exceeded"}"#.to_vec(),
            },
        );

        let client = client_with(&transport, None);
        let err = client
            .search_repositories("topic:ts", 100, 1)
            .await
            .expect_err("403 should error");
        match err {
            GitHubError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("rate limit"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_maps_to_json_error() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/search/users?q=type%3Aorg&per_page=100&page=1",
            "not json",
        );

        let client = client_with(&transport, None);
        let err = client
            .search_users("type:org", 100, 1)
            .await
            .expect_err("bad body should error");
        assert!(matches!(err, GitHubError::Json { .. }));
    }

    #[tokio::test]
    async fn org_profile_fetches_absolute_url() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/orgs/acme",
            r#"{"login":"acme","html_url":"https://github.com/acme","blog":"https://acme.dev"}"#,
        );

        let client = client_with(&transport, Some("t123"));
        let profile = client
            .org_profile("https://api.github.com/orgs/acme")
            .await
            .expect("profile");
        assert_eq!(profile.login, "acme");
        assert_eq!(profile.website(), Some("https://acme.dev"));
    }

    #[tokio::test]
    async fn with_base_url_rebases_search_requests() {
        let transport = MockTransport::new();
        transport.push_json(
            "http://127.0.0.1:9999/search/users?q=type%3Aorg&per_page=100&page=1",
            r#"{"total_count":0,"items":[]}"#,
        );

        let client = client_with(&transport, None).with_base_url("http://127.0.0.1:9999/");
        client.search_users("type:org", 100, 1).await.expect("page");

        assert_eq!(
            transport.requests()[0].url,
            "http://127.0.0.1:9999/search/users?q=type%3Aorg&per_page=100&page=1"
        );
    }
}
