//! Pull request domain entity
//!
//! A pull request pulled from GitHub and filed under one user and one month.
//! Records are immutable once stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::MonthId;
use super::org::{OrgId, ProjectId};
use super::user::UserId;

/// State string GitHub reports for a pull request that is no longer open
pub const CLOSED_STATE: &str = "closed";

/// Approximate merge status from the issue state.
///
/// The search API only exposes `open`/`closed`, so a PR that was closed
/// without merging still counts as merged here. Telling the two apart needs
/// one extra request per PR, which ingestion does not make.
pub fn approximate_merged(status: &str) -> bool {
    status == CLOSED_STATE
}

/// Unique identifier for a pull request record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestId(pub Uuid);

impl PullRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PullRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PullRequestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored pull request record
#[derive(Debug, Clone, Serialize)]
pub struct PullRequest {
    pub id: PullRequestId,
    pub title: String,
    pub url: String,
    /// Raw state string from GitHub (`open` or `closed`)
    pub status: String,
    pub merged: bool,
    pub user_id: UserId,
    pub month_id: MonthId,
    pub org_id: Option<OrgId>,
    pub project_id: Option<ProjectId>,
    pub created_at: DateTime<Utc>,
}

/// A pull request together with the display names of what it points at
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestDetails {
    #[serde(flatten)]
    pub pr: PullRequest,
    pub month: String,
    pub org: Option<String>,
    pub project: Option<String>,
}

/// Data needed to store a pull request
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub title: String,
    pub url: String,
    pub status: String,
    pub merged: bool,
    pub user_id: UserId,
    pub month_id: MonthId,
}
