//! Helpers for reading multipart form fields.

use actix_multipart::Field;
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};

/// Maximum size of a plain text form field.
pub const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// A file field read into memory.
pub struct FilePart {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FilePart {
    /// Lower-cased extension of the uploaded filename.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Form field name, or empty when absent.
pub fn field_name(field: &Field) -> String {
    field
        .content_disposition()
        .and_then(|cd| cd.get_name())
        .unwrap_or_default()
        .to_string()
}

/// Filename of a file field, with any client-side directory stripped.
pub fn field_filename(field: &Field) -> Option<String> {
    field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|name| name.replace('\\', "/"))
        .and_then(|name| name.rsplit('/').next().map(String::from))
        .filter(|name| !name.is_empty())
}

/// Read a field into memory, failing once it exceeds `limit` bytes.
pub async fn read_bytes(field: &mut Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        if data.len() + chunk.len() > limit {
            return Err(AppError::InvalidInput(format!(
                "Field '{}' exceeds {} bytes",
                field_name(field),
                limit
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Read a UTF-8 text field.
pub async fn read_text(field: &mut Field) -> AppResult<String> {
    let data = read_bytes(field, MAX_TEXT_FIELD_SIZE).await?;
    String::from_utf8(data).map_err(|_| {
        AppError::InvalidInput(format!("Field '{}' is not valid UTF-8", field_name(field)))
    })
}

/// Read a file field.
pub async fn read_file(field: &mut Field, limit: usize) -> AppResult<FilePart> {
    let filename = field_filename(field)
        .ok_or_else(|| AppError::InvalidInput("File field has no filename".to_string()))?;
    let content_type = field.content_type().map(|m| m.to_string());
    let data = read_bytes(field, limit).await?;
    Ok(FilePart {
        filename,
        content_type,
        data,
    })
}

/// Drain a multipart field without saving.
pub async fn drain(field: &mut Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}

/// Largest accepted file field, registered as app data.
#[derive(Debug, Clone, Copy)]
pub struct MaxUploadSize(pub usize);
