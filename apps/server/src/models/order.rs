//! Combined order view and its query DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

/// One payment joined with its physical mail order, model run and print
/// management record.
///
/// Joined fields are grouped by prefix: `mr_` (model run), `pmo_` (physical
/// mail order), `pom_` (print-order management). A missing match leaves every
/// field of that group null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombinedOrder {
    pub order_id: Uuid,
    pub payment_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub customer_email: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Resolved model run: the order's own reference, else the mail order's.
    pub model_run_id: Option<Uuid>,

    pub mr_status: Option<String>,
    /// First output image of the model run.
    pub mr_image_url: Option<String>,
    pub mr_cost: Option<f64>,

    pub pmo_id: Option<Uuid>,
    pub pmo_shipping_status: Option<String>,
    pub pmo_shipping_address: Option<JsonValue>,
    pub pmo_tracking_number: Option<String>,
    pub pmo_carrier: Option<String>,
    pub pmo_created_at: Option<DateTime<Utc>>,

    pub pom_status: Option<String>,
    /// Orders without a management record are visible.
    pub pom_is_visible: bool,
    pub pom_notes: Option<String>,
    pub pom_batch_id: Option<String>,
}

/// Query parameters for listing combined orders.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListOrdersQuery {
    /// Maximum orders to return (1-500, default 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    /// Include orders staff have hidden.
    #[serde(default)]
    pub include_hidden: bool,
    /// Only orders whose physical mail order has this shipping status.
    pub shipping_status: Option<String>,
    /// Only orders assigned to this batch.
    pub batch_id: Option<String>,
    /// Only orders with (true) or without (false) a physical mail order.
    pub has_physical_order: Option<bool>,
}

fn default_limit() -> u64 {
    100
}

impl Default for ListOrdersQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            include_hidden: false,
            shipping_status: None,
            batch_id: None,
            has_physical_order: None,
        }
    }
}

impl ListOrdersQuery {
    pub fn clamped_limit(&self) -> u64 {
        self.limit.clamp(1, 500)
    }

    /// Check whether a reconciled row passes the post-join filters.
    pub fn matches(&self, order: &CombinedOrder) -> bool {
        if !self.include_hidden && !order.pom_is_visible {
            return false;
        }
        if let Some(ref status) = self.shipping_status
            && order.pmo_shipping_status.as_deref() != Some(status.as_str())
        {
            return false;
        }
        if let Some(ref batch) = self.batch_id
            && order.pom_batch_id.as_deref() != Some(batch.as_str())
        {
            return false;
        }
        if let Some(has_pmo) = self.has_physical_order
            && order.pmo_id.is_some() != has_pmo
        {
            return false;
        }
        true
    }
}

/// Response for the combined order list.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<CombinedOrder>,
    /// Rows in the orders table (before post-join filters).
    pub total: u64,
    /// Secondary tables that could not be read; their fields are null.
    pub warnings: Vec<String>,
}

/// Response for a single combined order.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    pub success: bool,
    pub order: CombinedOrder,
    pub warnings: Vec<String>,
}
