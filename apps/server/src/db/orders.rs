//! Database queries for payment events.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entity::order::{self, Entity as Order};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// List orders newest first, with the table's total row count.
    pub async fn list_orders(&self, limit: u64, offset: u64) -> AppResult<(Vec<order::Model>, u64)> {
        let total = Order::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count orders: {}", e)))?;

        let orders = Order::find()
            .order_by_desc(order::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list orders: {}", e)))?;

        Ok((orders, total))
    }

    /// Get an order by its external payment id.
    pub async fn get_order_by_payment_id(&self, payment_id: &str) -> AppResult<Option<order::Model>> {
        let result = Order::find()
            .filter(order::Column::PaymentId.eq(payment_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get order: {}", e)))?;

        Ok(result)
    }
}
