//! Aggregation service
//!
//! Read-only views over stored pull requests: the leaderboard, the admin
//! dashboard, and per-handle lookups for a single month. Leaderboard and
//! dashboard only count months in the tracked set; the lookup takes any
//! month.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::app::MonthRegistry;
use crate::domain::entities::{PullRequestDetails, TrackedMonths, UserId};
use crate::domain::ports::{MonthRepository, PullRequestRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// A user's standing on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub github_user: String,
    pub pr_count: usize,
}

/// A user and every tracked pull request they opened
#[derive(Debug, Clone, Serialize)]
pub struct DashboardEntry {
    pub name: String,
    pub github_user: String,
    pub prs: Vec<PullRequestDetails>,
}

/// Lookup result for one handle. `prs` is `None` when the user or month is
/// unknown or could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct HandleLookup {
    pub username: String,
    pub prs: Option<Vec<PullRequestDetails>>,
}

/// Service computing aggregate views
pub struct AggregationService<UR, MR, PR>
where
    UR: UserRepository,
    MR: MonthRepository,
    PR: PullRequestRepository,
{
    users: Arc<UR>,
    registry: Arc<MonthRegistry<MR>>,
    prs: Arc<PR>,
    tracked: TrackedMonths,
}

impl<UR, MR, PR> AggregationService<UR, MR, PR>
where
    UR: UserRepository,
    MR: MonthRepository,
    PR: PullRequestRepository,
{
    pub fn new(
        users: Arc<UR>,
        registry: Arc<MonthRegistry<MR>>,
        prs: Arc<PR>,
        tracked: TrackedMonths,
    ) -> Self {
        Self {
            users,
            registry,
            prs,
            tracked,
        }
    }

    /// Tracked pull requests grouped by owner
    async fn tracked_prs_by_user(
        &self,
    ) -> Result<HashMap<UserId, Vec<PullRequestDetails>>, AppError> {
        let prs = self.prs.find_in_months(self.tracked.as_slice()).await?;

        let mut by_user: HashMap<UserId, Vec<PullRequestDetails>> = HashMap::new();
        for pr in prs.into_iter().filter(|pr| self.tracked.contains(&pr.month)) {
            by_user.entry(pr.pr.user_id).or_default().push(pr);
        }
        Ok(by_user)
    }

    /// Tracked PR count per user, most PRs first, ties broken by handle
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let users = self.users.find_all().await?;
        let by_user = self.tracked_prs_by_user().await?;

        let mut entries: Vec<LeaderboardEntry> = users
            .into_iter()
            .map(|user| LeaderboardEntry {
                pr_count: by_user.get(&user.id).map_or(0, Vec::len),
                name: user.name,
                github_user: user.github_user,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.pr_count
                .cmp(&a.pr_count)
                .then_with(|| a.github_user.cmp(&b.github_user))
        });
        Ok(entries)
    }

    /// Every user with their tracked PRs, ordered by handle
    pub async fn dashboard(&self) -> Result<Vec<DashboardEntry>, AppError> {
        let users = self.users.find_all().await?;
        let mut by_user = self.tracked_prs_by_user().await?;

        let mut entries: Vec<DashboardEntry> = users
            .into_iter()
            .map(|user| DashboardEntry {
                prs: by_user.remove(&user.id).unwrap_or_default(),
                name: user.name,
                github_user: user.github_user,
            })
            .collect();

        entries.sort_by(|a, b| a.github_user.cmp(&b.github_user));
        Ok(entries)
    }

    /// PRs each handle opened in `month`, in request order.
    ///
    /// Every handle is resolved on its own; a missing user, a missing month,
    /// or a read failure only nulls that handle's entry.
    pub async fn lookup(&self, handles: &[String], month: &str) -> Vec<HandleLookup> {
        let mut results = Vec::with_capacity(handles.len());

        for handle in handles {
            let prs = match self.lookup_one(handle, month).await {
                Ok(prs) => Some(prs),
                Err(DomainError::NotFound(what)) => {
                    tracing::debug!(user = %handle, month = %month, "Lookup found no {}", what);
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, user = %handle, month = %month, "PR lookup failed");
                    None
                }
            };
            results.push(HandleLookup {
                username: handle.clone(),
                prs,
            });
        }

        results
    }

    async fn lookup_one(
        &self,
        handle: &str,
        month: &str,
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        let user = self
            .users
            .find_by_github_user(handle)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user '{}'", handle)))?;

        let month = self
            .registry
            .find(month)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("month '{}'", month)))?;

        self.prs.find_by_user_and_month(&user.id, &month.id).await
    }
}
