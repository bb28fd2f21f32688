//! Pull request lookup handlers
//!
//! Endpoint returning the stored pull requests of several handles for one
//! month.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::HandleLookup;
use crate::domain::entities::PullRequestDetails;
use crate::AppState;

/// Request body for `POST /track-prs`
#[derive(Debug, Deserialize)]
pub struct TrackPrsRequest {
    pub usernames: Vec<String>,
    /// Month label, `YYYY-MM`
    pub month_name: String,
}

/// A stored pull request as returned to callers
#[derive(Debug, Serialize)]
pub struct PrResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub status: String,
    pub merged: bool,
    pub created: String,
    pub org: Option<String>,
    pub project: Option<String>,
    pub month: String,
}

impl From<PullRequestDetails> for PrResponse {
    fn from(details: PullRequestDetails) -> Self {
        let PullRequestDetails {
            pr,
            month,
            org,
            project,
        } = details;
        Self {
            id: pr.id.to_string(),
            title: pr.title,
            url: pr.url,
            status: pr.status,
            merged: pr.merged,
            created: pr.created_at.to_rfc3339(),
            org,
            project,
            month,
        }
    }
}

/// Lookup result for one requested handle
#[derive(Debug, Serialize)]
pub struct TrackedUserResponse {
    pub username: String,
    /// `null` when the user or month is unknown
    pub prs: Option<Vec<PrResponse>>,
}

impl From<HandleLookup> for TrackedUserResponse {
    fn from(lookup: HandleLookup) -> Self {
        Self {
            username: lookup.username,
            prs: lookup
                .prs
                .map(|prs| prs.into_iter().map(PrResponse::from).collect()),
        }
    }
}

/// POST /track-prs
///
/// Stored pull requests for each handle in `month_name`, in request order.
/// A failure for one handle never affects the others.
pub async fn track_prs(
    State(state): State<AppState>,
    Json(request): Json<TrackPrsRequest>,
) -> Json<Vec<TrackedUserResponse>> {
    let month = request.month_name.trim();
    let results = state
        .aggregation_service
        .lookup(&request.usernames, month)
        .await;

    Json(results.into_iter().map(TrackedUserResponse::from).collect())
}
