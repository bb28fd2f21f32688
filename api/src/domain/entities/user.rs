//! User domain entity
//!
//! A contributor whose pull requests are tracked, keyed by their GitHub handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// GitHub caps usernames at 39 characters
pub const MAX_HANDLE_LEN: usize = 39;

/// Whether `handle` follows GitHub's username rules: ASCII letters, digits
/// and single hyphens, never at either end. Length is checked separately.
pub fn is_valid_github_handle(handle: &str) -> bool {
    !handle.is_empty()
        && !handle.starts_with('-')
        && !handle.ends_with('-')
        && !handle.contains("--")
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered contributor
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Handle on GitHub, unique across users
    pub github_user: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to register a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub github_user: String,
}

impl NewUser {
    /// Trim both fields and reject blank, oversized or malformed values
    pub fn normalized(&self) -> Result<NewUser, DomainError> {
        let name = self.name.trim();
        let github_user = self.github_user.trim();

        if name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if github_user.is_empty() {
            return Err(DomainError::Validation(
                "github_user must not be empty".into(),
            ));
        }
        if github_user.len() > MAX_HANDLE_LEN {
            return Err(DomainError::Validation(format!(
                "github_user must be at most {} characters",
                MAX_HANDLE_LEN
            )));
        }

        if !is_valid_github_handle(github_user) {
            return Err(DomainError::Validation(format!(
                "github_user '{}' is not a valid GitHub username",
                github_user
            )));
        }

        Ok(NewUser {
            name: name.to_string(),
            github_user: github_user.to_string(),
        })
    }
}
