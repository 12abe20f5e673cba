//! S3 storage service for generated sheets and uploaded images.
//!
//! Supports both AWS S3 and MinIO for development. Objects are addressed by
//! the public URL returned from [`Storage::put`].

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::config::StorageSettings;
use crate::error::{AppError, AppResult};
use crate::models::StickerLayout;

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    url_base: String,
}

/// Base URL objects are reachable under, without trailing slash.
fn url_base(config: &StorageSettings) -> String {
    if let Some(ref base) = config.public_base_url {
        return base.trim_end_matches('/').to_string();
    }
    match config.endpoint {
        Some(ref endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
        None => format!("https://{}.s3.{}.amazonaws.com", config.bucket, config.region),
    }
}

impl Storage {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &StorageSettings) -> AppResult<Self> {
        let credentials =
            Credentials::new(
                &config.access_key,
                config.secret_key.expose_secret(),
                None,
                None,
                "printdesk",
            );

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        // Use custom endpoint for MinIO in development
        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        let storage = Self {
            client,
            bucket: config.bucket.clone(),
            url_base: url_base(config),
        };

        // Verify bucket exists or create it
        storage.ensure_bucket_exists().await?;

        info!(
            "S3 storage initialized: bucket={}, public_url={}",
            config.bucket, storage.url_base
        );

        Ok(storage)
    }

    /// Ensure the bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                info!("S3 bucket '{}' exists", self.bucket);
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", self.bucket);
                    self.client
                        .create_bucket()
                        .bucket(&self.bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    info!("S3 bucket '{}' created", self.bucket);
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        self.bucket, service_error
                    )))
                }
            }
        }
    }

    /// Get the content type for an accepted image extension.
    pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
        match ext.to_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            _ => None,
        }
    }

    /// Upload an object and return its public URL.
    pub async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file to S3: {}", e)))?;

        Ok(self.public_url(key))
    }

    /// Public URL of an object key.
    pub fn public_url(&self, key: &str) -> String {
        join_url(&self.url_base, key)
    }

    /// Key for a generated sheet. Derived from the source and layout so a
    /// repeated request overwrites the same object.
    ///
    /// Format: sticker-sheets/{sha256(url|layout)}.png
    pub fn sticker_sheet_key(source_url: &str, layout: StickerLayout) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source_url.as_bytes());
        hasher.update(b"|");
        hasher.update(layout.as_str().as_bytes());
        format!("sticker-sheets/{}.png", hex::encode(hasher.finalize()))
    }

    /// Key for an uploaded image.
    ///
    /// Format: uploads/{uuid}.{ext}
    pub fn upload_key(ext: &str) -> String {
        format!("uploads/{}.{}", Uuid::now_v7(), ext.to_lowercase())
    }
}

/// Append a key to a base URL, percent-encoding each path segment.
fn join_url(base: &str, key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", base, encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StorageSettings {
        StorageSettings {
            endpoint: Some("http://localhost:9100/".to_string()),
            bucket: "printdesk".to_string(),
            region: "us-east-1".to_string(),
            access_key: "k".to_string(),
            secret_key: secrecy::SecretString::from("s".to_string()),
            public_base_url: None,
        }
    }

    #[test]
    fn test_url_base_variants() {
        let mut config = settings();
        assert_eq!(url_base(&config), "http://localhost:9100/printdesk");

        config.endpoint = None;
        assert_eq!(
            url_base(&config),
            "https://printdesk.s3.us-east-1.amazonaws.com"
        );

        config.public_base_url = Some("https://cdn.example/".to_string());
        assert_eq!(url_base(&config), "https://cdn.example");
    }

    #[test]
    fn test_join_url_encodes_segments() {
        assert_eq!(
            join_url("https://cdn.example", "uploads/my file.png"),
            "https://cdn.example/uploads/my%20file.png"
        );
    }

    #[test]
    fn test_sticker_sheet_key_is_stable() {
        let a = Storage::sticker_sheet_key("https://x/1.png", StickerLayout::TwoUp);
        let b = Storage::sticker_sheet_key("https://x/1.png", StickerLayout::TwoUp);
        let c = Storage::sticker_sheet_key("https://x/1.png", StickerLayout::ThreeUp);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("sticker-sheets/"));
        assert!(a.ends_with(".png"));
        assert_eq!(a.len(), "sticker-sheets/".len() + 64 + ".png".len());
    }

    #[test]
    fn test_upload_key() {
        let key = Storage::upload_key("PNG");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(Storage::content_type_for_extension("png"), Some("image/png"));
        assert_eq!(Storage::content_type_for_extension("JPG"), Some("image/jpeg"));
        assert_eq!(Storage::content_type_for_extension("webp"), Some("image/webp"));
        assert_eq!(Storage::content_type_for_extension("svg"), None);
    }
}
