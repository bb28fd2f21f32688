//! Pull request source port
//!
//! Defines the interface for fetching a user's pull requests from GitHub.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GitHubError;

/// A pull request as reported by the source, normalized for storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedPullRequest {
    pub title: String,
    pub status: String,
    pub url: String,
    pub merged: bool,
}

/// Source of pull request history
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetch the pull requests `handle` opened during `month` (`YYYY-MM`).
    ///
    /// Makes exactly one request. Any failure fails the whole call; partial
    /// results are never returned.
    async fn fetch_prs(
        &self,
        handle: &str,
        month: &str,
    ) -> Result<Vec<FetchedPullRequest>, GitHubError>;
}
