//! Print-order management models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::print_order;

/// Staff workflow status for a print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrintStatus {
    /// Paid, not yet looked at.
    New,
    Printing,
    Printed,
    Shipped,
    OnHold,
    Cancelled,
}

impl PrintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Printing => "printing",
            Self::Printed => "printed",
            Self::Shipped => "shipped",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial update of a print management record. Absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePrintOrderRequest {
    pub status: Option<PrintStatus>,
    pub is_visible: Option<bool>,
    /// Free-text notes; an empty string clears them.
    pub notes: Option<String>,
}

impl UpdatePrintOrderRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.is_visible.is_none() && self.notes.is_none()
    }
}

/// Print management record as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrintOrderResponse {
    pub success: bool,
    pub id: Uuid,
    pub payment_id: String,
    /// Stored status; values written outside this service are passed through.
    pub status: String,
    pub is_visible: bool,
    pub notes: Option<String>,
    pub batch_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<print_order::Model> for PrintOrderResponse {
    fn from(m: print_order::Model) -> Self {
        Self {
            success: true,
            id: m.id,
            payment_id: m.payment_id,
            status: m.status,
            is_visible: m.is_visible,
            notes: m.notes,
            batch_id: m.batch_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names_match_as_str() {
        for status in [
            PrintStatus::New,
            PrintStatus::Printing,
            PrintStatus::Printed,
            PrintStatus::Shipped,
            PrintStatus::OnHold,
            PrintStatus::Cancelled,
        ] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, status.as_str());
        }
        assert!(serde_json::from_str::<PrintStatus>(r#""lost""#).is_err());
    }

    #[test]
    fn test_update_request_deserializes_partial_body() {
        let req: UpdatePrintOrderRequest =
            serde_json::from_str(r#"{"status":"on_hold"}"#).unwrap();
        assert_eq!(req.status, Some(PrintStatus::OnHold));
        assert!(req.is_visible.is_none());
        assert!(!req.is_empty());

        let empty: UpdatePrintOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
