//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Month, MonthId, NewPullRequest, NewUser, PullRequest, PullRequestDetails, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by GitHub handle
    async fn find_by_github_user(&self, handle: &str) -> Result<Option<User>, DomainError>;

    /// All users, ordered by GitHub handle
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Create a new user. Fails with `AlreadyExists` if the handle is taken.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for Month entities
#[async_trait]
pub trait MonthRepository: Send + Sync {
    /// Find a month by its label
    async fn find_by_name(&self, name: &str) -> Result<Option<Month>, DomainError>;

    /// Return the month with this label, creating it if needed.
    ///
    /// Must be atomic: two concurrent calls for the same unseen label return
    /// the same month and leave exactly one row behind.
    async fn find_or_create(&self, name: &str) -> Result<Month, DomainError>;
}

/// Repository for PullRequest entities
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Store a batch of pull requests atomically (all or none)
    async fn create_many(
        &self,
        new_prs: &[NewPullRequest],
    ) -> Result<Vec<PullRequest>, DomainError>;

    /// All pull requests a user filed under one month, oldest first
    async fn find_by_user_and_month(
        &self,
        user_id: &UserId,
        month_id: &MonthId,
    ) -> Result<Vec<PullRequestDetails>, DomainError>;

    /// All pull requests filed under any of the given month labels, oldest first
    async fn find_in_months(
        &self,
        labels: &[String],
    ) -> Result<Vec<PullRequestDetails>, DomainError>;
}
