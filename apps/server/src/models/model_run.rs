//! Model run DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::model_run;

/// Output image URLs stored as a JSON array; non-string entries are skipped.
pub fn output_urls(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        JsonValue::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Query parameters for listing model runs.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListModelRunsQuery {
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl ListModelRunsQuery {
    /// Clamp limit to the allowed range.
    pub fn clamped_limit(&self) -> u64 {
        self.limit.clamp(1, 500)
    }
}

/// Model run as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelRunResponse {
    pub id: Uuid,
    pub status: String,
    pub output_image_urls: Vec<String>,
    pub cost: Option<f64>,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl From<model_run::Model> for ModelRunResponse {
    fn from(m: model_run::Model) -> Self {
        Self {
            id: m.id,
            status: m.status,
            output_image_urls: output_urls(&m.output_image_urls),
            cost: m.cost,
            metadata: m.metadata,
            created_at: m.created_at,
        }
    }
}

/// Response for a single model run.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelRunDetailResponse {
    pub success: bool,
    pub model_run: ModelRunResponse,
}

/// Response for listing model runs.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelRunListResponse {
    pub success: bool,
    pub model_runs: Vec<ModelRunResponse>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_urls() {
        assert_eq!(
            output_urls(&json!(["https://a/1.png", 3, "https://a/2.png"])),
            vec!["https://a/1.png", "https://a/2.png"]
        );
        assert_eq!(output_urls(&json!("https://a/1.png")), vec!["https://a/1.png"]);
        assert!(output_urls(&json!(null)).is_empty());
    }
}
