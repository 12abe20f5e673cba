//! Staff authentication.
//!
//! Every admin route takes an [`AdminAuth`] argument. The shared key lives in
//! a `SecretString` and is compared in constant time; neither the stored nor
//! the presented value is ever logged.

mod extractor;

use actix_web::http::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::config::ADMIN_KEY_HEADER;
use crate::error::{AppError, AppResult};

pub use extractor::AdminAuth;

/// The configured staff key. `None` locks every admin route.
#[derive(Clone)]
pub struct AdminKey(Option<SecretString>);

impl AdminKey {
    pub fn new(key: Option<String>) -> Self {
        Self::from_secret(key.map(SecretString::from))
    }

    pub fn from_secret(key: Option<SecretString>) -> Self {
        Self(key.filter(|k| !k.expose_secret().is_empty()))
    }

    /// Constant-time comparison; always false when no key is configured.
    pub fn verify(&self, provided: &str) -> bool {
        self.0
            .as_ref()
            .is_some_and(|secret| secret.expose_secret().as_bytes().ct_eq(provided.as_bytes()).into())
    }

    /// Check the `X-Admin-Key` header of a request.
    pub fn authorize(&self, headers: &HeaderMap) -> AppResult<()> {
        if self.0.is_none() {
            return Err(AppError::Unauthorized(
                "Admin key is not configured".to_string(),
            ));
        }

        let provided = headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| SecretString::from(s.to_string()))
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", ADMIN_KEY_HEADER)))?;

        if self.verify(provided.expose_secret()) {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Invalid admin key".to_string()))
        }
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => write!(f, "AdminKey([REDACTED])"),
            None => write!(f, "AdminKey(None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(key: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(key) = key {
            map.insert(
                HeaderName::from_static("x-admin-key"),
                HeaderValue::from_str(key).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_verify() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert!(key.verify("s3cret"));
        assert!(!key.verify("s3cre"));
        assert!(!key.verify(""));
    }

    #[test]
    fn test_empty_configured_key_counts_as_unset() {
        let key = AdminKey::new(Some(String::new()));
        assert!(!key.verify(""));
        assert!(key.authorize(&headers(Some(""))).is_err());
    }

    #[test]
    fn test_authorize_outcomes() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert!(key.authorize(&headers(Some("s3cret"))).is_ok());

        let missing = key.authorize(&headers(None)).unwrap_err().to_string();
        assert!(missing.contains("Missing X-Admin-Key"));

        let wrong = key.authorize(&headers(Some("nope"))).unwrap_err().to_string();
        assert!(wrong.contains("Invalid admin key"));

        let locked = AdminKey::new(None).authorize(&headers(Some("s3cret")));
        assert!(locked.is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let key = AdminKey::new(Some("s3cret".to_string()));
        assert_eq!(format!("{:?}", key), "AdminKey([REDACTED])");
    }
}
