//! Admin profile API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AdminProfileResponse, UpsertAdminProfileRequest};

/// Maximum profile name length.
const MAX_NAME_LEN: usize = 64;

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "Profile name must be 1-{} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Get a staff member's saved view settings.
#[utoipa::path(
    get,
    path = "/api/v1/admin-profiles/{name}",
    tag = "Admin Profiles",
    params(
        ("name" = String, Path, description = "Profile name")
    ),
    responses(
        (status = 200, description = "Profile", body = AdminProfileResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Profile not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn get_profile(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    let profile = pool
        .get_admin_profile(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Admin profile {}", name)))?;

    Ok(HttpResponse::Ok().json(AdminProfileResponse::from(profile)))
}

/// Create or replace a staff member's saved view settings.
#[utoipa::path(
    put,
    path = "/api/v1/admin-profiles/{name}",
    tag = "Admin Profiles",
    params(
        ("name" = String, Path, description = "Profile name")
    ),
    request_body = UpsertAdminProfileRequest,
    responses(
        (status = 200, description = "Saved profile", body = AdminProfileResponse),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn upsert_profile(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<UpsertAdminProfileRequest>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    validate_name(&name)?;
    let req = body.into_inner();

    let notes = req
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let profile = pool
        .upsert_admin_profile(&name, req.preferred_columns, notes)
        .await?;

    info!(profile = %name, "Admin profile saved");

    Ok(HttpResponse::Ok().json(AdminProfileResponse::from(profile)))
}

/// Configure admin profile routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin-profiles/{name}")
            .route(web::get().to(get_profile))
            .route(web::put().to(upsert_profile)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("sam").is_ok());
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"x".repeat(65)).is_err());
    }
}
