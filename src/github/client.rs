use crate::config::Secret;
use crate::error::{NduError, Result};
use crate::github::Forge;
use crate::github::context::{RepoSlug, api_base_url};
use reqwest::blocking::Client;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Fixed title and body of the pull request the workflow opens.
pub const PR_TITLE: &str = "Update NPM dependencies";
pub const PR_BODY: &str = "This pull request updates NPM packages";

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Payload for POST /repos/{owner}/{repo}/pulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestParams {
    pub title: String,
    pub body: String,
    pub base: String,
    pub head: String,
}

impl PullRequestParams {
    /// Parameters for the manifest update pull request, merging `head` into
    /// `base`.
    pub fn manifest_update(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            title: PR_TITLE.to_string(),
            body: PR_BODY.to_string(),
            base: base.into(),
            head: head.into(),
        }
    }
}

/// The subset of the create-pull-request response the workflow reports.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// GitHub REST client
#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Secret,
}

impl GitHubClient {
    pub fn new(token: Secret) -> Result<Self> {
        Self::with_base_url(api_base_url(), token)
    }

    /// Points the client at a specific API root: GITHUB_API_URL on GitHub
    /// Enterprise, a local server in tests.
    pub fn with_base_url(base_url: impl Into<String>, token: Secret) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self::validate_api_url(&base_url)?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("ndu")
            .danger_accept_invalid_certs(false)
            .build()
            .map_err(|e| NduError::GitHubApi(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn validate_api_url(url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|_| NduError::GitHubApi(format!("Invalid API URL: {url}")))?;

        match parsed.scheme() {
            "https" | "http" => Ok(()),
            scheme => Err(NduError::GitHubApi(format!(
                "Unsupported API URL scheme: {scheme}"
            ))),
        }
    }
}

impl Forge for GitHubClient {
    fn open_pull_request(
        &self,
        slug: &RepoSlug,
        params: &PullRequestParams,
    ) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_url, slug.owner, slug.repo);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(params)
            .send()
            .map_err(|e| NduError::GitHubApi(format!("POST {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // The response body carries the API's own error message; keep it
            // verbatim so the job log shows what the server objected to.
            let body = response.text().unwrap_or_default();
            return Err(NduError::GitHubApi(format!(
                "POST {url} returned {status}: {body}"
            )));
        }

        response.json().map_err(|e| {
            NduError::GitHubApi(format!("Failed to decode pull request response: {e}"))
        })
    }
}
