//! Database queries for model runs.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::entity::model_run::{self, Entity as ModelRun};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Fetch model runs by id.
    pub async fn find_model_runs_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<model_run::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = ModelRun::find()
            .filter(model_run::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch model runs: {}", e)))?;

        Ok(result)
    }

    /// Get a model run by ID.
    pub async fn get_model_run_by_id(&self, id: Uuid) -> AppResult<Option<model_run::Model>> {
        let result = ModelRun::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get model run: {}", e)))?;

        Ok(result)
    }

    /// List model runs newest first, optionally filtered by status.
    pub async fn list_model_runs(
        &self,
        status: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<model_run::Model>, u64)> {
        let mut select = ModelRun::find();
        if let Some(status) = status {
            select = select.filter(model_run::Column::Status.eq(status));
        }

        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count model runs: {}", e)))?;

        let runs = select
            .order_by_desc(model_run::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list model runs: {}", e)))?;

        Ok((runs, total))
    }
}
