//! Ingestion service
//!
//! Pulls a user's pull requests from the source for every tracked month and
//! files them under that user and month. Ingestion is best effort: each
//! month is fetched and stored independently, and failures are logged and
//! reported instead of returned.

use std::sync::Arc;

use serde::Serialize;

use crate::app::MonthRegistry;
use crate::domain::entities::{NewPullRequest, TrackedMonths, User};
use crate::domain::ports::{
    FetchedPullRequest, MonthRepository, PullRequestRepository, PullRequestSource,
};
use crate::error::DomainError;

/// What happened to one month during ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MonthOutcome {
    /// Fetched and stored `count` pull requests
    Ingested { count: usize },
    /// The source call failed; nothing was stored for this month
    FetchFailed { reason: String },
    /// Fetched, but resolving the month or storing the batch failed
    StoreFailed { reason: String },
}

/// Per-month results of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub github_user: String,
    pub months: Vec<(String, MonthOutcome)>,
}

impl IngestionReport {
    /// Pull requests stored across all months
    pub fn total_ingested(&self) -> usize {
        self.months
            .iter()
            .map(|(_, outcome)| match outcome {
                MonthOutcome::Ingested { count } => *count,
                _ => 0,
            })
            .sum()
    }

    /// Months that did not complete
    pub fn failed_months(&self) -> usize {
        self.months
            .iter()
            .filter(|(_, outcome)| !matches!(outcome, MonthOutcome::Ingested { .. }))
            .count()
    }
}

/// Service that ingests pull request history for users
pub struct IngestionService<PS, MR, PR>
where
    PS: PullRequestSource,
    MR: MonthRepository,
    PR: PullRequestRepository,
{
    source: Arc<PS>,
    registry: Arc<MonthRegistry<MR>>,
    prs: Arc<PR>,
}

impl<PS, MR, PR> IngestionService<PS, MR, PR>
where
    PS: PullRequestSource,
    MR: MonthRepository,
    PR: PullRequestRepository,
{
    pub fn new(source: Arc<PS>, registry: Arc<MonthRegistry<MR>>, prs: Arc<PR>) -> Self {
        Self {
            source,
            registry,
            prs,
        }
    }

    /// Ingest `user`'s pull requests for each tracked month, in order
    pub async fn ingest(&self, user: &User, tracked: &TrackedMonths) -> IngestionReport {
        let mut months = Vec::new();

        for label in tracked.iter() {
            let outcome = self.ingest_month(user, label).await;
            months.push((label.to_string(), outcome));
        }

        IngestionReport {
            github_user: user.github_user.clone(),
            months,
        }
    }

    async fn ingest_month(&self, user: &User, label: &str) -> MonthOutcome {
        let fetched = match self.source.fetch_prs(&user.github_user, label).await {
            Ok(prs) => prs,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = if e.is_transport() { "transport" } else { "decode" },
                    user = %user.github_user,
                    month = %label,
                    "Skipping month, PR fetch failed"
                );
                return MonthOutcome::FetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        match self.store_month(user, label, fetched).await {
            Ok(count) => {
                tracing::debug!(user = %user.github_user, month = %label, count, "Stored PRs");
                MonthOutcome::Ingested { count }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user = %user.github_user,
                    month = %label,
                    "Failed to store PRs for month"
                );
                MonthOutcome::StoreFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn store_month(
        &self,
        user: &User,
        label: &str,
        fetched: Vec<FetchedPullRequest>,
    ) -> Result<usize, DomainError> {
        let month = self.registry.resolve(label).await?;

        let new_prs: Vec<NewPullRequest> = fetched
            .into_iter()
            .map(|pr| NewPullRequest {
                title: pr.title,
                url: pr.url,
                status: pr.status,
                merged: pr.merged,
                user_id: user.id,
                month_id: month.id,
            })
            .collect();

        let created = self.prs.create_many(&new_prs).await?;
        Ok(created.len())
    }
}
