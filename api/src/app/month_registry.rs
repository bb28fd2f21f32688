//! Month registry
//!
//! Resolves month labels to month entities, creating each month the first
//! time it is referenced. Uniqueness under concurrency is delegated to the
//! repository's atomic find-or-create.

use std::sync::Arc;

use crate::domain::entities::{validate_month_label, Month};
use crate::domain::ports::MonthRepository;
use crate::error::DomainError;

/// Service for resolving months by label
pub struct MonthRegistry<MR>
where
    MR: MonthRepository,
{
    months: Arc<MR>,
}

impl<MR> MonthRegistry<MR>
where
    MR: MonthRepository,
{
    pub fn new(months: Arc<MR>) -> Self {
        Self { months }
    }

    /// Return the month for `label`, creating it on first use
    pub async fn resolve(&self, label: &str) -> Result<Month, DomainError> {
        validate_month_label(label)?;
        self.months.find_or_create(label).await
    }

    /// Look a month up without creating it
    pub async fn find(&self, label: &str) -> Result<Option<Month>, DomainError> {
        self.months.find_by_name(label).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::InMemoryMonthRepository;

    fn create_registry(repo: Arc<InMemoryMonthRepository>) -> MonthRegistry<InMemoryMonthRepository> {
        MonthRegistry::new(repo)
    }

    #[tokio::test]
    async fn resolve_creates_month_on_first_use() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = create_registry(repo.clone());

        let month = registry.resolve("2025-09").await.unwrap();

        assert_eq!(month.name, "2025-09");
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn resolve_twice_returns_same_month() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = create_registry(repo.clone());

        let first = registry.resolve("2025-09").await.unwrap();
        let second = registry.resolve("2025-09").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn concurrent_resolve_creates_one_month() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = Arc::new(create_registry(repo.clone()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.resolve("2025-10").await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn distinct_labels_get_distinct_months() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = create_registry(repo.clone());

        let sep = registry.resolve("2025-09").await.unwrap();
        let oct = registry.resolve("2025-10").await.unwrap();

        assert_ne!(sep.id, oct.id);
        assert_eq!(repo.count(), 2);
    }

    #[tokio::test]
    async fn resolve_rejects_invalid_label_without_creating() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = create_registry(repo.clone());

        let result = registry.resolve("September").await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn resolve_propagates_storage_failure() {
        let repo = Arc::new(InMemoryMonthRepository::failing());
        let registry = create_registry(repo);

        let result = registry.resolve("2025-09").await;

        assert!(matches!(result, Err(DomainError::Database(_))));
    }

    #[tokio::test]
    async fn find_does_not_create() {
        let repo = Arc::new(InMemoryMonthRepository::new());
        let registry = create_registry(repo.clone());

        assert!(registry.find("2025-09").await.unwrap().is_none());
        assert_eq!(repo.count(), 0);

        let created = registry.resolve("2025-09").await.unwrap();
        let found = registry.find("2025-09").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }
}
