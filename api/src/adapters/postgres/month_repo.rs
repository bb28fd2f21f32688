//! PostgreSQL adapter for MonthRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::entities::{Month, MonthId};
use crate::domain::ports::MonthRepository;
use crate::entity::months;
use crate::error::DomainError;

/// PostgreSQL implementation of MonthRepository
pub struct PostgresMonthRepository {
    db: DatabaseConnection,
}

impl PostgresMonthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MonthRepository for PostgresMonthRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Month>, DomainError> {
        let result = months::Entity::find()
            .filter(months::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_or_create(&self, name: &str) -> Result<Month, DomainError> {
        let model = months::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        // The unique index on months.name arbitrates concurrent creators: the
        // loser inserts nothing and reads the winner's row below.
        let inserted = months::Entity::insert(model)
            .on_conflict(
                OnConflict::column(months::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if inserted > 0 {
            tracing::info!(month = %name, "Created month");
        }

        self.find_by_name(name).await?.ok_or_else(|| {
            DomainError::Internal(format!("Month '{}' missing after find-or-create", name))
        })
    }
}

/// Convert SeaORM model to domain entity
impl From<months::Model> for Month {
    fn from(model: months::Model) -> Self {
        Month {
            id: MonthId(model.id),
            name: model.name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
