//! Database queries for physical mail orders.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::entity::physical_mail_order::{self, ActiveModel, Entity as PhysicalMailOrder};
use crate::error::{AppError, AppResult};
use crate::models::ShippingStatus;

use super::DbPool;

impl DbPool {
    /// Fetch mail orders for a set of payment ids, oldest first so the
    /// original order wins a first-match join.
    pub async fn find_mail_orders_by_payment_ids(
        &self,
        payment_ids: &[String],
    ) -> AppResult<Vec<physical_mail_order::Model>> {
        if payment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PhysicalMailOrder::find()
            .filter(physical_mail_order::Column::PaymentId.is_in(payment_ids.iter().cloned()))
            .order_by_asc(physical_mail_order::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch mail orders: {}", e)))?;

        Ok(result)
    }

    /// Get a mail order by ID.
    pub async fn get_mail_order_by_id(
        &self,
        id: Uuid,
    ) -> AppResult<Option<physical_mail_order::Model>> {
        let result = PhysicalMailOrder::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get mail order: {}", e)))?;

        Ok(result)
    }

    /// Replace the stored shipping address.
    pub async fn update_shipping_address(
        &self,
        id: Uuid,
        address: JsonValue,
    ) -> AppResult<physical_mail_order::Model> {
        let existing = self
            .get_mail_order_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Physical mail order {}", id)))?;

        let mut active: ActiveModel = existing.into();
        active.shipping_address = Set(address);
        active.updated_at = Set(chrono::Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update address: {}", e)))?;

        Ok(result)
    }

    /// Set tracking number and carrier, optionally moving the shipping status.
    pub async fn update_tracking(
        &self,
        id: Uuid,
        tracking_number: String,
        carrier: String,
        status: Option<ShippingStatus>,
    ) -> AppResult<physical_mail_order::Model> {
        let existing = self
            .get_mail_order_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Physical mail order {}", id)))?;

        let mut active: ActiveModel = existing.into();
        active.tracking_number = Set(Some(tracking_number));
        active.carrier = Set(Some(carrier));
        if let Some(status) = status {
            active.shipping_status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update tracking: {}", e)))?;

        Ok(result)
    }
}
