//! Admin profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::admin_profile;

/// Upsert body for an admin profile.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertAdminProfileRequest {
    /// Column keys shown in the order table, in display order.
    #[serde(default)]
    pub preferred_columns: Vec<String>,
    pub notes: Option<String>,
}

/// Admin profile as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProfileResponse {
    pub success: bool,
    pub id: Uuid,
    pub name: String,
    pub preferred_columns: Vec<String>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<admin_profile::Model> for AdminProfileResponse {
    fn from(m: admin_profile::Model) -> Self {
        let preferred_columns = serde_json::from_value(m.preferred_columns).unwrap_or_default();
        Self {
            success: true,
            id: m.id,
            name: m.name,
            preferred_columns,
            notes: m.notes,
            updated_at: m.updated_at,
        }
    }
}
