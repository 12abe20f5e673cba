//! Email notifications through an HTTP mail API.
//!
//! Messages are built as RFC 5322 text and posted as
//! `{"raw": <base64url message>}` with a bearer token.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::config::MailSettings;
use crate::error::{AppError, AppResult};
use crate::models::EmailRequest;

/// Maximum subject length accepted from the form.
const MAX_SUBJECT_LEN: usize = 998;

/// Mail API client.
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    access_token: SecretString,
    sender: String,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

/// Validate a single mailbox address (`local@domain`, no whitespace).
pub fn validate_address(addr: &str) -> AppResult<()> {
    let invalid = || AppError::InvalidInput(format!("Invalid email address: {}", addr));

    if addr.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }
    let (local, domain) = addr.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    Ok(())
}

fn validate_header_value(name: &str, value: &str) -> AppResult<()> {
    if value.contains('\r') || value.contains('\n') {
        return Err(AppError::InvalidInput(format!(
            "{} must not contain line breaks",
            name
        )));
    }
    Ok(())
}

/// Check the form before building a message.
pub fn validate_request(req: &EmailRequest) -> AppResult<()> {
    validate_address(&req.to)?;
    if let Some(ref cc) = req.cc {
        validate_address(cc)?;
    }
    if req.subject.trim().is_empty() {
        return Err(AppError::InvalidInput("subject is required".to_string()));
    }
    if req.subject.len() > MAX_SUBJECT_LEN {
        return Err(AppError::InvalidInput("subject is too long".to_string()));
    }
    validate_header_value("subject", &req.subject)?;
    if let Some(ref attachment) = req.attachment {
        validate_header_value("attachment filename", &attachment.filename)?;
        validate_header_value("attachment content type", &attachment.content_type)?;
    }
    Ok(())
}

/// RFC 2047 encode a header value when it is not plain ASCII.
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
    }
}

fn crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Base64 wrapped at 76 columns.
fn wrapped_base64(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    encoded
        .as_bytes()
        .chunks(76)
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Build the full message text. `boundary` separates the MIME parts.
pub fn build_message(sender: &str, req: &EmailRequest, boundary: &str) -> String {
    let mut headers = vec![
        format!("From: {}", sender),
        format!("To: {}", req.to),
    ];
    if let Some(ref cc) = req.cc {
        headers.push(format!("Cc: {}", cc));
    }
    headers.push(format!("Subject: {}", encode_header(req.subject.trim())));
    headers.push(format!("Date: {}", Utc::now().to_rfc2822()));
    headers.push("MIME-Version: 1.0".to_string());

    let text_part_headers =
        "Content-Type: text/plain; charset=utf-8\r\nContent-Transfer-Encoding: 8bit";
    let body = crlf(&req.body);

    match req.attachment {
        None => format!(
            "{}\r\n{}\r\n\r\n{}\r\n",
            headers.join("\r\n"),
            text_part_headers,
            body
        ),
        Some(ref attachment) => {
            let filename = attachment.filename.replace('"', "");
            headers.push(format!(
                "Content-Type: multipart/mixed; boundary=\"{}\"",
                boundary
            ));
            format!(
                "{headers}\r\n\r\n\
                 --{b}\r\n{text_headers}\r\n\r\n{body}\r\n\
                 --{b}\r\n\
                 Content-Type: {ct}; name=\"{name}\"\r\n\
                 Content-Disposition: attachment; filename=\"{name}\"\r\n\
                 Content-Transfer-Encoding: base64\r\n\r\n\
                 {data}\r\n\
                 --{b}--\r\n",
                headers = headers.join("\r\n"),
                b = boundary,
                text_headers = text_part_headers,
                body = body,
                ct = attachment.content_type,
                name = encode_header(&filename),
                data = wrapped_base64(&attachment.data),
            )
        }
    }
}

impl Mailer {
    pub fn new(client: reqwest::Client, settings: &MailSettings) -> Self {
        info!(
            "Mail API configured (url={}, sender={})",
            settings.api_url, settings.sender
        );
        Self {
            client,
            api_url: settings.api_url.clone(),
            access_token: settings.access_token.clone(),
            sender: settings.sender.clone(),
        }
    }

    /// Validate, build and send one message. Returns the API's message id.
    pub async fn send(&self, req: &EmailRequest) -> AppResult<Option<String>> {
        validate_request(req)?;

        let boundary = format!("printdesk-{}", Uuid::new_v4().simple());
        let message = build_message(&self.sender, req, &boundary);
        let raw = URL_SAFE.encode(message.as_bytes());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Mail API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!(
                "Mail API returned {}: {}",
                status, detail
            )));
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| AppError::Mail(format!("Unreadable mail API response: {}", e)))?;

        info!(
            to = %req.to,
            has_attachment = req.attachment.is_some(),
            message_id = ?sent.id,
            "Email sent"
        );
        Ok(sent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::EmailAttachment;

    fn request() -> EmailRequest {
        EmailRequest {
            to: "buyer@example.com".to_string(),
            cc: None,
            subject: "Your stickers shipped".to_string(),
            body: "Tracking: 1Z999\nThanks!".to_string(),
            attachment: None,
        }
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("a@b.co").is_ok());
        assert!(validate_address("ops@localhost").is_ok());
        assert!(validate_address("a@").is_err());
        assert!(validate_address("@b.co").is_err());
        assert!(validate_address("a b@c.co").is_err());
        assert!(validate_address("a@b.co\r\nBcc: x@y.z").is_err());
        assert!(validate_address("a@@b.co").is_err());
    }

    #[test]
    fn test_validate_request_rejects_header_injection() {
        let mut req = request();
        req.subject = "hi\r\nBcc: victim@example.com".to_string();
        assert!(validate_request(&req).is_err());

        let mut req = request();
        req.subject = "   ".to_string();
        assert!(validate_request(&req).is_err());

        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn test_plain_message() {
        let msg = build_message("shop@example.com", &request(), "unused");
        assert!(msg.starts_with("From: shop@example.com\r\nTo: buyer@example.com\r\n"));
        assert!(msg.contains("Subject: Your stickers shipped\r\n"));
        assert!(msg.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(msg.contains("\r\n\r\nTracking: 1Z999\r\nThanks!\r\n"));
        assert!(!msg.contains("multipart"));
    }

    #[test]
    fn test_message_with_attachment() {
        let mut req = request();
        req.cc = Some("ops@example.com".to_string());
        req.attachment = Some(EmailAttachment {
            filename: "sheet.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; 100],
        });

        let msg = build_message("shop@example.com", &req, "BOUNDARY");
        assert!(msg.contains("Cc: ops@example.com\r\n"));
        assert!(msg.contains("Content-Type: multipart/mixed; boundary=\"BOUNDARY\""));
        assert_eq!(msg.matches("--BOUNDARY\r\n").count(), 2);
        assert!(msg.ends_with("--BOUNDARY--\r\n"));
        assert!(msg.contains("Content-Disposition: attachment; filename=\"sheet.png\""));

        // 100 bytes -> 136 base64 chars, wrapped at 76.
        let encoded = STANDARD.encode([0u8; 100]);
        let expected = format!("{}\r\n{}", &encoded[..76], &encoded[76..]);
        assert!(msg.contains(&expected));
    }

    #[test]
    fn test_non_ascii_subject_encoded() {
        let mut req = request();
        req.subject = "Stickers für dich".to_string();
        let msg = build_message("shop@example.com", &req, "B");
        assert!(msg.contains("Subject: =?UTF-8?B?"));
        assert!(!msg.contains("für"));
    }
}
