//! `FromRequest` glue for [`AdminKey::authorize`].

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};

use super::AdminKey;
use crate::error::AppError;

/// Proof that the request carried the admin key. Put it first in a handler's
/// arguments so rejection happens before any other extraction.
#[derive(Debug)]
pub struct AdminAuth;

impl FromRequest for AdminAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AdminKey>>() {
            Some(key) => key.authorize(req.headers()).map(|()| AdminAuth),
            None => Err(AppError::Unauthorized(
                "Admin key is not configured".to_string(),
            )),
        };
        ready(result)
    }
}
