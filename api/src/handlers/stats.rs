//! Aggregate view handlers
//!
//! Leaderboard and admin dashboard over the tracked months.

use axum::{extract::State, Json};
use serde::Serialize;

use super::track::PrResponse;
use crate::app::{DashboardEntry, LeaderboardEntry};
use crate::error::AppError;
use crate::AppState;

/// One user's tracked pull requests
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub name: String,
    pub github_user: String,
    pub prs: Vec<PrResponse>,
}

impl From<DashboardEntry> for DashboardResponse {
    fn from(entry: DashboardEntry) -> Self {
        Self {
            name: entry.name,
            github_user: entry.github_user,
            prs: entry.prs.into_iter().map(PrResponse::from).collect(),
        }
    }
}

/// GET /leaderboard
///
/// PR counts per user over the tracked months, highest first.
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = state.aggregation_service.leaderboard().await?;
    Ok(Json(entries))
}

/// GET /admin-dashboard
pub async fn admin_dashboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<DashboardResponse>>, AppError> {
    let entries = state.aggregation_service.dashboard().await?;
    Ok(Json(
        entries.into_iter().map(DashboardResponse::from).collect(),
    ))
}
