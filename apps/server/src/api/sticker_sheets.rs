//! Sticker sheet generation and image upload handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::{info, warn};

use super::multipart::{self, FilePart, MaxUploadSize};
use crate::auth::AdminAuth;
use crate::error::{AppError, AppResult};
use crate::models::{CreateStickerSheetRequest, StickerSheetResponse, UploadResponse};
use crate::services::compositor;
use crate::services::fetcher::parse_source_url;
use crate::services::{ImageFetcher, Storage};

/// Form field carrying the uploaded image.
const UPLOAD_FIELD: &str = "file";

/// Generate a printable sheet from a model output image.
///
/// The source is downloaded, trimmed, scaled and pasted once per layout slot,
/// then stored under a key derived from the source URL and layout.
#[utoipa::path(
    post,
    path = "/api/v1/sticker-sheets",
    tag = "Sticker Sheets",
    request_body = CreateStickerSheetRequest,
    responses(
        (status = 201, description = "Sheet generated and stored", body = StickerSheetResponse),
        (status = 400, description = "Invalid URL or undecodable image", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 502, description = "Source image could not be fetched", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn create_sticker_sheet(
    _auth: AdminAuth,
    storage: web::Data<Storage>,
    fetcher: web::Data<ImageFetcher>,
    body: web::Json<CreateStickerSheetRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let url = parse_source_url(&req.image_url)?;
    let layout = req.layout;

    let source = fetcher.fetch(&url).await?;
    let source_bytes = source.len();

    let sheet = web::block(move || compositor::compose(&source, layout))
        .await
        .map_err(|e| AppError::Image(format!("Compositing task failed: {}", e)))??;

    let key = Storage::sticker_sheet_key(url.as_str(), layout);
    let (width, height) = (sheet.width, sheet.height);
    let public_url = storage.put(&key, sheet.png, "image/png").await?;

    info!(
        source = %url,
        layout = %layout,
        source_bytes,
        key = %key,
        "Sticker sheet generated"
    );

    Ok(HttpResponse::Created().json(StickerSheetResponse {
        success: true,
        url: public_url,
        key,
        layout,
        width,
        height,
    }))
}

/// Upload an image file to the blob store.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    tag = "Sticker Sheets",
    request_body(content = crate::models::sticker::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported type or too large", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn upload_image(
    _auth: AdminAuth,
    storage: web::Data<Storage>,
    limit: web::Data<MaxUploadSize>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut upload: Option<(FilePart, &'static str)> = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        if multipart::field_name(&field) != UPLOAD_FIELD || upload.is_some() {
            warn!(field = %multipart::field_name(&field), "Skipping unexpected form field");
            multipart::drain(&mut field).await;
            continue;
        }

        let file = multipart::read_file(&mut field, limit.0).await?;
        let content_type = file
            .extension()
            .and_then(|ext| Storage::content_type_for_extension(&ext))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Unsupported file type: {} (allowed: png, jpg, jpeg, gif, webp)",
                    file.filename
                ))
            })?;
        if file.data.is_empty() {
            return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
        }
        upload = Some((file, content_type));
    }

    let (file, content_type) = upload.ok_or_else(|| {
        AppError::InvalidInput(format!("Missing '{}' field", UPLOAD_FIELD))
    })?;

    let ext = file.extension().unwrap_or_default();
    let key = Storage::upload_key(&ext);
    let size = file.data.len();
    let url = storage.put(&key, file.data, content_type).await?;

    info!(filename = %file.filename, key = %key, size, "Image uploaded");

    Ok(HttpResponse::Created().json(UploadResponse {
        success: true,
        url,
        key,
        size,
    }))
}

/// Configure sticker sheet and upload routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/sticker-sheets").route(web::post().to(create_sticker_sheet)))
        .service(web::resource("/uploads").route(web::post().to(upload_image)));
}
