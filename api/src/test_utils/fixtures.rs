//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::domain::entities::{approximate_merged, User, UserId};
use crate::domain::ports::FetchedPullRequest;

/// Create a test user for `handle`, named after it ("alice" -> "Alice")
pub fn test_user(handle: &str) -> User {
    let mut chars = handle.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    User {
        id: UserId::new(),
        name,
        github_user: handle.to_string(),
        created_at: Utc::now(),
    }
}

/// Create a normalized PR as the source would return it
pub fn fetched_pr(title: &str, status: &str) -> FetchedPullRequest {
    FetchedPullRequest {
        title: title.to_string(),
        status: status.to_string(),
        url: format!(
            "https://github.com/example/repo/pull/{}",
            title.to_lowercase().replace(' ', "-")
        ),
        merged: approximate_merged(status),
    }
}
