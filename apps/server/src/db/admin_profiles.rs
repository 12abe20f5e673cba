//! Database queries for admin profiles.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::admin_profile::{self, ActiveModel, Entity as AdminProfile};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Get a profile by name.
    pub async fn get_admin_profile(&self, name: &str) -> AppResult<Option<admin_profile::Model>> {
        let result = AdminProfile::find()
            .filter(admin_profile::Column::Name.eq(name))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get admin profile: {}", e)))?;

        Ok(result)
    }

    /// Create or replace a profile's columns and notes.
    pub async fn upsert_admin_profile(
        &self,
        name: &str,
        preferred_columns: Vec<String>,
        notes: Option<String>,
    ) -> AppResult<admin_profile::Model> {
        let columns = serde_json::to_value(preferred_columns)?;

        let result = match self.get_admin_profile(name).await? {
            Some(existing) => {
                let mut active: ActiveModel = existing.into();
                active.preferred_columns = Set(columns);
                active.notes = Set(notes);
                active.updated_at = Set(Utc::now());
                active.update(self.connection()).await
            }
            None => {
                ActiveModel {
                    id: Set(Uuid::now_v7()),
                    name: Set(name.to_string()),
                    preferred_columns: Set(columns),
                    notes: Set(notes),
                    updated_at: Set(Utc::now()),
                }
                .insert(self.connection())
                .await
            }
        }
        .map_err(|e| AppError::Database(format!("Failed to save admin profile: {}", e)))?;

        Ok(result)
    }
}
