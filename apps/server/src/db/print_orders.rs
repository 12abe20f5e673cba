//! Database queries for print-order management records and batches.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::print_order::{self, ActiveModel, Entity as PrintOrder};
use crate::error::{AppError, AppResult};
use crate::models::{PrintStatus, UpdatePrintOrderRequest};

use super::DbPool;

/// Fresh record for a payment that staff have not touched yet.
fn new_record(payment_id: &str) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: Set(Uuid::now_v7()),
        payment_id: Set(payment_id.to_string()),
        status: Set(PrintStatus::New.as_str().to_string()),
        is_visible: Set(true),
        notes: Set(None),
        batch_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl DbPool {
    /// Fetch management records for a set of payment ids.
    pub async fn find_print_orders_by_payment_ids(
        &self,
        payment_ids: &[String],
    ) -> AppResult<Vec<print_order::Model>> {
        if payment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PrintOrder::find()
            .filter(print_order::Column::PaymentId.is_in(payment_ids.iter().cloned()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch print orders: {}", e)))?;

        Ok(result)
    }

    /// Get the management record for a payment.
    pub async fn get_print_order(&self, payment_id: &str) -> AppResult<Option<print_order::Model>> {
        let result = PrintOrder::find()
            .filter(print_order::Column::PaymentId.eq(payment_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get print order: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update, creating the record first when missing.
    pub async fn upsert_print_order(
        &self,
        payment_id: &str,
        update: &UpdatePrintOrderRequest,
    ) -> AppResult<print_order::Model> {
        let existing = self.get_print_order(payment_id).await?;
        let is_new = existing.is_none();

        let mut active: ActiveModel = match existing {
            Some(model) => model.into(),
            None => new_record(payment_id),
        };

        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(visible) = update.is_visible {
            active.is_visible = Set(visible);
        }
        if let Some(ref notes) = update.notes {
            let notes = notes.trim();
            active.notes = Set((!notes.is_empty()).then(|| notes.to_string()));
        }
        active.updated_at = Set(Utc::now());

        let result = if is_new {
            active.insert(self.connection()).await
        } else {
            active.update(self.connection()).await
        }
        .map_err(|e| AppError::Database(format!("Failed to save print order: {}", e)))?;

        Ok(result)
    }

    /// Assign payments to a batch, creating missing records.
    pub async fn assign_batch(&self, batch_id: &str, payment_ids: &[String]) -> AppResult<()> {
        let existing: Vec<String> = self
            .find_print_orders_by_payment_ids(payment_ids)
            .await?
            .into_iter()
            .map(|m| m.payment_id)
            .collect();

        if !existing.is_empty() {
            PrintOrder::update_many()
                .col_expr(print_order::Column::BatchId, Expr::value(batch_id.to_string()))
                .col_expr(print_order::Column::UpdatedAt, Expr::cust("NOW()"))
                .filter(print_order::Column::PaymentId.is_in(existing.iter().cloned()))
                .exec(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to assign batch: {}", e)))?;
        }

        let missing: Vec<ActiveModel> = payment_ids
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|id| {
                let mut record = new_record(id);
                record.batch_id = Set(Some(batch_id.to_string()));
                record
            })
            .collect();

        if !missing.is_empty() {
            PrintOrder::insert_many(missing)
                .exec(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to create print orders: {}", e)))?;
        }

        Ok(())
    }

    /// Clear `batch_id` on every member of a batch. Returns rows released.
    pub async fn release_batch(&self, batch_id: &str) -> AppResult<u64> {
        let result = PrintOrder::update_many()
            .col_expr(print_order::Column::BatchId, Expr::cust("NULL"))
            .col_expr(print_order::Column::UpdatedAt, Expr::cust("NOW()"))
            .filter(print_order::Column::BatchId.eq(batch_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to release batch: {}", e)))?;

        Ok(result.rows_affected)
    }

    /// Remove one payment from whatever batch it is in.
    pub async fn release_from_batch(&self, payment_id: &str) -> AppResult<print_order::Model> {
        let existing = self
            .get_print_order(payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Print order for payment {}", payment_id)))?;

        let mut active: ActiveModel = existing.into();
        active.batch_id = Set(None);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to release print order: {}", e)))?;

        Ok(result)
    }

    /// All `(batch_id, payment_id)` pairs, ordered by batch then age.
    pub async fn list_batch_members(&self) -> AppResult<Vec<(String, String)>> {
        let rows = PrintOrder::find()
            .filter(print_order::Column::BatchId.is_not_null())
            .order_by_asc(print_order::Column::BatchId)
            .order_by_asc(print_order::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list batches: {}", e)))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| m.batch_id.map(|batch| (batch, m.payment_id)))
            .collect())
    }
}
