//! Email notification DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Email fields collected from the multipart form.
#[derive(Debug, Clone, Default)]
pub struct EmailRequest {
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
    pub attachment: Option<EmailAttachment>,
}

/// A single file attached to an email.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Multipart form accepted by the email endpoint (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct EmailForm {
    /// Recipient address.
    pub to: String,
    /// Optional carbon-copy address.
    pub cc: Option<String>,
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Optional file.
    #[schema(value_type = Option<String>, format = Binary)]
    pub attachment: Option<Vec<u8>>,
}

/// Send confirmation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmailSentResponse {
    pub success: bool,
    /// Id assigned by the mail API.
    pub message_id: Option<String>,
}
