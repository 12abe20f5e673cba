//! Shipping batch models.
//!
//! A batch is the set of print management records sharing a `batch_id`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Maximum batch id length.
pub const MAX_BATCH_ID_LEN: usize = 64;

/// Validate a batch id: 1-64 chars of `[A-Za-z0-9_-]`.
pub fn validate_batch_id(batch_id: &str) -> AppResult<()> {
    if batch_id.is_empty() || batch_id.len() > MAX_BATCH_ID_LEN {
        return Err(AppError::InvalidInput(format!(
            "batch_id must be 1-{} characters",
            MAX_BATCH_ID_LEN
        )));
    }
    if !batch_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(
            "batch_id may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(())
}

/// Request to assign payments to a batch.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignBatchRequest {
    pub payment_ids: Vec<String>,
}

impl AssignBatchRequest {
    /// Trimmed, de-duplicated payment ids in request order.
    pub fn normalized_payment_ids(&self) -> AppResult<Vec<String>> {
        let mut ids: Vec<String> = Vec::with_capacity(self.payment_ids.len());
        for id in &self.payment_ids {
            let id = id.trim();
            if id.is_empty() {
                return Err(AppError::InvalidInput(
                    "payment_ids must not contain empty values".to_string(),
                ));
            }
            if !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
        }
        if ids.is_empty() {
            return Err(AppError::InvalidInput(
                "payment_ids must not be empty".to_string(),
            ));
        }
        Ok(ids)
    }
}

/// One batch and its members.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BatchSummary {
    pub batch_id: String,
    pub payment_ids: Vec<String>,
    pub count: usize,
}

impl BatchSummary {
    pub fn new(batch_id: String, payment_ids: Vec<String>) -> Self {
        let count = payment_ids.len();
        Self {
            batch_id,
            payment_ids,
            count,
        }
    }
}

/// Response listing all batches.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchListResponse {
    pub success: bool,
    pub batches: Vec<BatchSummary>,
}

/// Response after assigning payments to a batch.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchAssignResponse {
    pub success: bool,
    pub batch: BatchSummary,
}

/// Response after releasing a batch's members.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchReleaseResponse {
    pub success: bool,
    pub batch_id: String,
    pub released: u64,
}

/// Group `(batch_id, payment_id)` pairs into summaries sorted by batch id.
pub fn group_batches(rows: impl IntoIterator<Item = (String, String)>) -> Vec<BatchSummary> {
    let mut grouped: std::collections::BTreeMap<String, Vec<String>> =
        std::collections::BTreeMap::new();
    for (batch_id, payment_id) in rows {
        grouped.entry(batch_id).or_default().push(payment_id);
    }
    grouped
        .into_iter()
        .map(|(batch_id, payment_ids)| BatchSummary::new(batch_id, payment_ids))
        .collect()
}
