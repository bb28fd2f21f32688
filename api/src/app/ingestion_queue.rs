//! Background ingestion queue
//!
//! Registration hands newly created users to this queue instead of calling
//! GitHub inline. A single worker task drains the queue and runs the
//! ingestion service for each user, so a slow or failing upstream never
//! holds up the request that created the user.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::app::IngestionService;
use crate::domain::entities::{TrackedMonths, User};
use crate::domain::ports::{MonthRepository, PullRequestRepository, PullRequestSource};
use crate::error::DomainError;

/// A user waiting for their pull requests to be ingested
#[derive(Debug)]
pub struct IngestionJob {
    pub user: User,
}

/// Sending half of the ingestion queue
#[derive(Clone)]
pub struct IngestionQueue {
    sender: mpsc::Sender<IngestionJob>,
}

impl IngestionQueue {
    /// Spawn the worker and return the queue feeding it.
    ///
    /// The worker exits once every `IngestionQueue` clone has been dropped
    /// and the remaining jobs are processed.
    pub fn start<PS, MR, PR>(
        service: Arc<IngestionService<PS, MR, PR>>,
        tracked: TrackedMonths,
        capacity: usize,
    ) -> (Self, JoinHandle<()>)
    where
        PS: PullRequestSource + 'static,
        MR: MonthRepository + 'static,
        PR: PullRequestRepository + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<IngestionJob>(capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let report = service.ingest(&job.user, &tracked).await;
                tracing::info!(
                    user = %report.github_user,
                    prs = report.total_ingested(),
                    failed_months = report.failed_months(),
                    "Ingestion finished"
                );
            }
            tracing::debug!("Ingestion queue closed");
        });

        (Self { sender }, worker)
    }

    /// Queue `user` for ingestion without waiting for room.
    ///
    /// Ingestion is best effort. A job rejected here because the queue is
    /// full or closed is dropped, and so is any job still queued when the
    /// process exits. Nothing re-ingests that user later.
    pub fn enqueue(&self, user: User) -> Result<(), DomainError> {
        self.sender
            .try_send(IngestionJob { user })
            .map_err(|e| match e {
                TrySendError::Full(job) => DomainError::Internal(format!(
                    "Ingestion queue full, dropped {}",
                    job.user.github_user
                )),
                TrySendError::Closed(job) => DomainError::Internal(format!(
                    "Ingestion queue closed, dropped {}",
                    job.user.github_user
                )),
            })
    }
}
