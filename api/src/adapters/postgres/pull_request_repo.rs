//! PostgreSQL adapter for PullRequestRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    MonthId, NewPullRequest, OrgId, ProjectId, PullRequest, PullRequestDetails, PullRequestId,
    UserId,
};
use crate::domain::ports::PullRequestRepository;
use crate::entity::{months, orgs, projects, prs};
use crate::error::DomainError;

/// PostgreSQL implementation of PullRequestRepository
pub struct PostgresPullRequestRepository {
    db: DatabaseConnection,
}

impl PostgresPullRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach month, org and project names to pull request rows
    async fn with_details(
        &self,
        rows: Vec<(prs::Model, Option<months::Model>)>,
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        let org_ids: Vec<Uuid> = rows.iter().filter_map(|(pr, _)| pr.org_id).collect();
        let project_ids: Vec<Uuid> = rows.iter().filter_map(|(pr, _)| pr.project_id).collect();

        let org_names: HashMap<Uuid, String> = if org_ids.is_empty() {
            HashMap::new()
        } else {
            orgs::Entity::find()
                .filter(orgs::Column::Id.is_in(org_ids))
                .all(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
                .into_iter()
                .map(|o| (o.id, o.name))
                .collect()
        };

        let project_names: HashMap<Uuid, String> = if project_ids.is_empty() {
            HashMap::new()
        } else {
            projects::Entity::find()
                .filter(projects::Column::Id.is_in(project_ids))
                .all(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect()
        };

        rows.into_iter()
            .map(|(pr, month)| {
                let month = month.ok_or_else(|| {
                    DomainError::Internal(format!("PR {} has no month", pr.id))
                })?;
                let org = pr.org_id.and_then(|id| org_names.get(&id).cloned());
                let project = pr.project_id.and_then(|id| project_names.get(&id).cloned());

                Ok(PullRequestDetails {
                    pr: pr.into(),
                    month: month.name,
                    org,
                    project,
                })
            })
            .collect()
    }
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn create_many(
        &self,
        new_prs: &[NewPullRequest],
    ) -> Result<Vec<PullRequest>, DomainError> {
        if new_prs.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // Rows of one batch are a microsecond apart so they list in input order
        let batch_start = Utc::now().fixed_offset();
        let mut created = Vec::with_capacity(new_prs.len());

        for (position, pr) in new_prs.iter().enumerate() {
            let model = prs::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(pr.title.clone()),
                url: Set(pr.url.clone()),
                status: Set(pr.status.clone()),
                merged: Set(pr.merged),
                user_id: Set(pr.user_id.0),
                month_id: Set(pr.month_id.0),
                org_id: Set(None),
                project_id: Set(None),
                created_at: Set(batch_start + Duration::microseconds(position as i64)),
            };

            // Dropping the transaction on error rolls it back.
            let result = model
                .insert(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            created.push(result.into());
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn find_by_user_and_month(
        &self,
        user_id: &UserId,
        month_id: &MonthId,
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        let rows = prs::Entity::find()
            .filter(prs::Column::UserId.eq(user_id.0))
            .filter(prs::Column::MonthId.eq(month_id.0))
            .find_also_related(months::Entity)
            .order_by_asc(prs::Column::CreatedAt)
            .order_by_asc(prs::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.with_details(rows).await
    }

    async fn find_in_months(
        &self,
        labels: &[String],
    ) -> Result<Vec<PullRequestDetails>, DomainError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let rows = prs::Entity::find()
            .find_also_related(months::Entity)
            .filter(months::Column::Name.is_in(labels.iter().cloned()))
            .order_by_asc(prs::Column::CreatedAt)
            .order_by_asc(prs::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.with_details(rows).await
    }
}

/// Convert SeaORM model to domain entity
impl From<prs::Model> for PullRequest {
    fn from(model: prs::Model) -> Self {
        PullRequest {
            id: PullRequestId(model.id),
            title: model.title,
            url: model.url,
            status: model.status,
            merged: model.merged,
            user_id: UserId(model.user_id),
            month_id: MonthId(model.month_id),
            org_id: model.org_id.map(OrgId),
            project_id: model.project_id.map(ProjectId),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
