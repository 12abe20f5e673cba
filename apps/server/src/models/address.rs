//! Shipping address and physical mail order models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::physical_mail_order;

/// Structured shipping address (stored as JSONB).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShippingAddress {
    /// Recipient name.
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "address1")]
    pub line1: String,
    #[serde(default, alias = "address2")]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: String,
    /// Two-letter state or region code after normalization.
    #[serde(default)]
    pub state: String,
    #[serde(default, alias = "zip")]
    pub postal_code: String,
    /// ISO country code.
    #[serde(default)]
    pub country: Option<String>,
}

impl ShippingAddress {
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Shipping status of a physical mail order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    Pending,
    LabelCreated,
    Shipped,
    Delivered,
    Returned,
}

impl ShippingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::LabelCreated => "label_created",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
        }
    }
}

impl std::fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to set tracking info.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTrackingRequest {
    pub tracking_number: String,
    pub carrier: String,
    /// Defaults to leaving the status unchanged.
    pub shipping_status: Option<ShippingStatus>,
}

/// Physical mail order as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhysicalMailOrderResponse {
    pub success: bool,
    pub id: Uuid,
    pub payment_id: String,
    pub model_run_id: Option<Uuid>,
    pub shipping_status: String,
    /// Stored address as-is.
    pub shipping_address: JsonValue,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<physical_mail_order::Model> for PhysicalMailOrderResponse {
    fn from(m: physical_mail_order::Model) -> Self {
        Self {
            success: true,
            id: m.id,
            payment_id: m.payment_id,
            model_run_id: m.model_run_id,
            shipping_status: m.shipping_status,
            shipping_address: m.shipping_address,
            tracking_number: m.tracking_number,
            carrier: m.carrier,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Response for address normalization preview.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NormalizeAddressResponse {
    pub success: bool,
    pub address: ShippingAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_accepts_aliases() {
        let value = serde_json::json!({
            "name": "ada lovelace",
            "address1": "1 Main St",
            "city": "boston",
            "state": "massachusetts",
            "zip": "02108"
        });
        let addr: ShippingAddress = serde_json::from_value(value).unwrap();
        assert_eq!(addr.line1, "1 Main St");
        assert_eq!(addr.postal_code, "02108");
        assert!(addr.line2.is_none());
    }

    #[test]
    fn test_shipping_status_wire_names() {
        let status: ShippingStatus = serde_json::from_str(r#""label_created""#).unwrap();
        assert_eq!(status, ShippingStatus::LabelCreated);
        assert_eq!(status.as_str(), "label_created");
        assert!(serde_json::from_str::<ShippingStatus>(r#""lost""#).is_err());
    }
}
