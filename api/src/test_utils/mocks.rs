//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Month, MonthId, NewPullRequest, NewUser, PullRequest, PullRequestDetails, PullRequestId, User,
    UserId,
};
use crate::domain::ports::{
    FetchedPullRequest, MonthRepository, PullRequestRepository, PullRequestSource, UserRepository,
};
use crate::error::{DomainError, GitHubError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    by_handle: Arc<RwLock<HashMap<String, User>>>,
    /// Handle whose lookups fail with a database error
    broken_handle: Option<String>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups for `handle` fail as if the database were unreachable
    pub fn failing_for(handle: &str) -> Self {
        Self {
            broken_handle: Some(handle.to_string()),
            ..Self::default()
        }
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.by_handle
            .write()
            .unwrap()
            .insert(user.github_user.clone(), user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_github_user(&self, handle: &str) -> Result<Option<User>, DomainError> {
        if self.broken_handle.as_deref() == Some(handle) {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(self.by_handle.read().unwrap().get(handle).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.by_handle.read().unwrap().values().cloned().collect();
        users.sort_by(|a, b| a.github_user.cmp(&b.github_user));
        Ok(users)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut by_handle = self.by_handle.write().unwrap();
        if by_handle.contains_key(&new_user.github_user) {
            return Err(DomainError::AlreadyExists(format!(
                "User with github_user '{}' already exists",
                new_user.github_user
            )));
        }

        let user = User {
            id: UserId::new(),
            name: new_user.name.clone(),
            github_user: new_user.github_user.clone(),
            created_at: Utc::now(),
        };
        by_handle.insert(user.github_user.clone(), user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Month Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMonthRepository {
    by_name: Arc<RwLock<HashMap<String, Month>>>,
    should_fail: bool,
}

impl InMemoryMonthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.by_name.read().unwrap().len()
    }

    pub fn get(&self, name: &str) -> Option<Month> {
        self.by_name.read().unwrap().get(name).cloned()
    }

    fn name_of(&self, id: &MonthId) -> Option<String> {
        self.by_name
            .read()
            .unwrap()
            .values()
            .find(|m| m.id == *id)
            .map(|m| m.name.clone())
    }
}

#[async_trait]
impl MonthRepository for InMemoryMonthRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Month>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(self.get(name))
    }

    async fn find_or_create(&self, name: &str) -> Result<Month, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("Mock failure".to_string()));
        }

        // One write lock covers both the lookup and the insert.
        let mut by_name = self.by_name.write().unwrap();
        let month = by_name.entry(name.to_string()).or_insert_with(|| Month {
            id: MonthId::new(),
            name: name.to_string(),
            created_at: Utc::now(),
        });
        Ok(month.clone())
    }
}

// ============================================================================
// In-Memory Pull Request Repository
// ============================================================================

pub struct InMemoryPullRequestRepository {
    prs: Arc<RwLock<Vec<PullRequest>>>,
    months: Arc<InMemoryMonthRepository>,
    should_fail: bool,
}

impl InMemoryPullRequestRepository {
    /// Month names are read from `months` when building details
    pub fn new(months: Arc<InMemoryMonthRepository>) -> Self {
        Self {
            prs: Arc::new(RwLock::new(Vec::new())),
            months,
            should_fail: false,
        }
    }

    pub fn failing(months: Arc<InMemoryMonthRepository>) -> Self {
        Self {
            should_fail: true,
            ..Self::new(months)
        }
    }

    pub fn count(&self) -> usize {
        self.prs.read().unwrap().len()
    }

    pub fn stored_for(&self, user_id: &UserId, month_id: &MonthId) -> Vec<PullRequest> {
        self.prs
            .read()
            .unwrap()
            .iter()
            .filter(|pr| pr.user_id == *user_id && pr.month_id == *month_id)
            .cloned()
            .collect()
    }

    fn details(&self, pr: PullRequest) -> Option<PullRequestDetails> {
        let month = self.months.name_of(&pr.month_id)?;
        Some(PullRequestDetails {
            pr,
            month,
            org: None,
            project: None,
        })
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn create_many(
        &self,
        new_prs: &[NewPullRequest],
    ) -> Result<Vec<PullRequest>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("Mock failure".to_string()));
        }

        let created: Vec<PullRequest> = new_prs
            .iter()
            .map(|pr| PullRequest {
                id: PullRequestId::new(),
                title: pr.title.clone(),
                url: pr.url.clone(),
                status: pr.status.clone(),
                merged: pr.merged,
                user_id: pr.user_id,
                month_id: pr.month_id,
                org_id: None,
                project_id: None,
                created_at: Utc::now(),
            })
            .collect();

        self.prs.write().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_by_user_and_month(
        &self,
        user_id: &UserId,
        month_id: &MonthId,
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        Ok(self
            .stored_for(user_id, month_id)
            .into_iter()
            .filter_map(|pr| self.details(pr))
            .collect())
    }

    async fn find_in_months(
        &self,
        labels: &[String],
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Database("Mock failure".to_string()));
        }
        let prs: Vec<PullRequest> = self.prs.read().unwrap().clone();
        Ok(prs
            .into_iter()
            .filter_map(|pr| self.details(pr))
            .filter(|d| labels.contains(&d.month))
            .collect())
    }
}

// ============================================================================
// Mock Pull Request Source
// ============================================================================

type SourceKey = (String, String); // (handle, month)

#[derive(Default)]
pub struct MockPullRequestSource {
    prs: HashMap<SourceKey, Vec<FetchedPullRequest>>,
    failing_months: HashSet<String>,
    fail_all: bool,
    calls: Arc<RwLock<Vec<SourceKey>>>,
}

impl MockPullRequestSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch fails with an upstream error
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Configure the PRs returned for `handle` in `month`
    pub fn with_prs(mut self, handle: &str, month: &str, prs: Vec<FetchedPullRequest>) -> Self {
        self.prs
            .insert((handle.to_string(), month.to_string()), prs);
        self
    }

    /// Fetches for `month` time out
    pub fn failing_for(mut self, month: &str) -> Self {
        self.failing_months.insert(month.to_string());
        self
    }

    /// Every (handle, month) pair fetched so far, in call order
    pub fn calls(&self) -> Vec<SourceKey> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestSource for MockPullRequestSource {
    async fn fetch_prs(
        &self,
        handle: &str,
        month: &str,
    ) -> Result<Vec<FetchedPullRequest>, GitHubError> {
        self.calls
            .write()
            .unwrap()
            .push((handle.to_string(), month.to_string()));

        if self.fail_all {
            return Err(GitHubError::Api {
                status: 502,
                message: "Mock failure".to_string(),
            });
        }
        if self.failing_months.contains(month) {
            return Err(GitHubError::Timeout);
        }

        Ok(self
            .prs
            .get(&(handle.to_string(), month.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
