//! GitHub search API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{approximate_merged, is_valid_github_handle};
use crate::domain::ports::{FetchedPullRequest, PullRequestSource};
use crate::error::GitHubError;

const USER_AGENT: &str = concat!("tracker-api/", env!("CARGO_PKG_VERSION"));

/// Implementation of the GitHub search client
pub struct GitHubClientImpl {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClientImpl {
    pub fn new(
        base_url: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GitHubError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn search_url(&self, handle: &str, month: &str) -> String {
        format!(
            "{}/search/issues?q={}",
            self.base_url,
            encode(&search_query(handle, month))
        )
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();

        if status.is_success() {
            // Read the body first so a timeout mid-body is reported as transport,
            // not as a decode failure.
            let body = response.bytes().await.map_err(map_request_error)?;
            serde_json::from_slice(&body).map_err(|e| GitHubError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(GitHubError::Unauthorized)
        } else if status.as_u16() == 403 || status.as_u16() == 429 {
            Err(GitHubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Search qualifier for PRs `handle` opened during `month`
fn search_query(handle: &str, month: &str) -> String {
    format!("author:{} type:pr created:{}", handle, month)
}

fn map_request_error(e: reqwest::Error) -> GitHubError {
    if e.is_timeout() {
        GitHubError::Timeout
    } else {
        GitHubError::Request(e)
    }
}

/// Response types from the GitHub API
#[derive(Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    title: String,
    state: String,
    html_url: String,
}

impl From<SearchItem> for FetchedPullRequest {
    fn from(item: SearchItem) -> Self {
        FetchedPullRequest {
            merged: approximate_merged(&item.state),
            title: item.title,
            status: item.state,
            url: item.html_url,
        }
    }
}

#[async_trait]
impl PullRequestSource for GitHubClientImpl {
    async fn fetch_prs(
        &self,
        handle: &str,
        month: &str,
    ) -> Result<Vec<FetchedPullRequest>, GitHubError> {
        if handle.trim().is_empty() {
            return Err(GitHubError::InvalidQuery("handle must not be empty".into()));
        }
        // Anything else could add qualifiers to the search query
        if !is_valid_github_handle(handle) {
            return Err(GitHubError::InvalidQuery(format!(
                "'{}' is not a valid GitHub username",
                handle
            )));
        }

        let mut request = self
            .http
            .get(self.search_url(handle, month))
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let resp = request.send().await.map_err(map_request_error)?;

        let result: SearchResponse = self.handle_response(resp).await?;
        tracing::debug!(
            user = %handle,
            month = %month,
            count = result.items.len(),
            "Fetched pull requests from GitHub"
        );

        Ok(result.items.into_iter().map(|item| item.into()).collect())
    }
}
