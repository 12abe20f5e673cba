//! Email notification handler.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::warn;

use super::multipart::{self, MaxUploadSize};
use crate::auth::AdminAuth;
use crate::error::{AppError, AppResult};
use crate::models::notification::EmailAttachment;
use crate::models::{EmailRequest, EmailSentResponse};
use crate::services::Mailer;

/// Collect the email form. Unknown fields are drained and ignored.
async fn read_email_form(payload: &mut Multipart, limit: usize) -> AppResult<EmailRequest> {
    let mut req = EmailRequest::default();
    let (mut has_to, mut has_subject, mut has_body) = (false, false, false);

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        match multipart::field_name(&field).as_str() {
            "to" => {
                req.to = multipart::read_text(&mut field).await?.trim().to_string();
                has_to = true;
            }
            "cc" => {
                let cc = multipart::read_text(&mut field).await?.trim().to_string();
                req.cc = (!cc.is_empty()).then_some(cc);
            }
            "subject" => {
                req.subject = multipart::read_text(&mut field).await?;
                has_subject = true;
            }
            "body" => {
                req.body = multipart::read_text(&mut field).await?;
                has_body = true;
            }
            "attachment" => {
                if req.attachment.is_some() {
                    return Err(AppError::InvalidInput(
                        "Only one attachment is allowed".to_string(),
                    ));
                }
                let file = multipart::read_file(&mut field, limit).await?;
                let content_type = file
                    .content_type
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                req.attachment = Some(EmailAttachment {
                    filename: file.filename,
                    content_type,
                    data: file.data,
                });
            }
            other => {
                warn!(field = %other, "Skipping unexpected form field");
                multipart::drain(&mut field).await;
            }
        }
    }

    let missing: Vec<&str> = [("to", has_to), ("subject", has_subject), ("body", has_body)]
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Missing form fields: {}",
            missing.join(", ")
        )));
    }

    Ok(req)
}

/// Send an email with an optional attachment through the mail API.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/email",
    tag = "Notifications",
    request_body(content = crate::models::notification::EmailForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Email accepted by the mail API", body = EmailSentResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 502, description = "Mail API failed", body = crate::error::ErrorResponse),
        (status = 503, description = "Mail is not configured", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn send_email(
    _auth: AdminAuth,
    mailer: Option<web::Data<Mailer>>,
    limit: web::Data<MaxUploadSize>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mailer = mailer.ok_or(AppError::MailDisabled)?;
    let req = read_email_form(&mut payload, limit.0).await?;
    let message_id = mailer.send(&req).await?;

    Ok(HttpResponse::Ok().json(EmailSentResponse {
        success: true,
        message_id,
    }))
}

/// Configure notification routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/notifications/email").route(web::post().to(send_email)));
}
