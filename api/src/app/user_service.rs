//! User service
//!
//! Handles user registration. Creating a user queues their pull request
//! history for background ingestion; registration itself never waits on or
//! fails because of GitHub.

use std::sync::Arc;

use crate::app::IngestionQueue;
use crate::domain::entities::{NewUser, User};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    ingestion: IngestionQueue,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, ingestion: IngestionQueue) -> Self {
        Self { users, ingestion }
    }

    /// Register a new user and queue their PR history for ingestion
    pub async fn register(&self, new_user: &NewUser) -> Result<User, AppError> {
        let new_user = new_user.normalized()?;

        // Check if the handle is already taken
        if self
            .users
            .find_by_github_user(&new_user.github_user)
            .await?
            .is_some()
        {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with github_user '{}' already exists",
                new_user.github_user
            ))));
        }

        let user = self.users.create(&new_user).await?;
        tracing::info!(user = %user.github_user, id = %user.id, "Registered user");

        if let Err(e) = self.ingestion.enqueue(user.clone()) {
            tracing::warn!(error = %e, user = %user.github_user, "PR ingestion not queued");
        }

        Ok(user)
    }
}
