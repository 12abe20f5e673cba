//! Liveness, readiness and version endpoints. These are not behind the
//! admin key.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::services::Mailer;

/// Liveness response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness response.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    /// `configured` or `disabled`.
    mail: &'static str,
}

/// Name and version of the running build.
#[derive(Serialize, ToSchema)]
pub struct ServerInfoResponse {
    name: &'static str,
    version: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// 503 until the database answers `SELECT 1`.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = ReadyResponse),
        (status = 503, description = "Database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn ready(pool: web::Data<DbPool>, mailer: Option<web::Data<Mailer>>) -> HttpResponse {
    let probe = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    if let Err(e) = pool.connection().query_one_raw(probe).await {
        tracing::warn!(error = %e, "Readiness probe failed");
        return HttpResponse::ServiceUnavailable().json(crate::error::ErrorResponse {
            success: false,
            error: "NOT_READY".to_string(),
            message: "Database connection failed".to_string(),
        });
    }

    HttpResponse::Ok().json(ReadyResponse {
        status: "ready",
        database: "connected",
        mail: if mailer.is_some() { "configured" } else { "disabled" },
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/info",
    tag = "Health",
    responses(
        (status = 200, description = "Build info", body = ServerInfoResponse)
    )
)]
pub async fn info() -> HttpResponse {
    HttpResponse::Ok().json(ServerInfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/ready").route(web::get().to(ready)))
        .service(web::resource("/info").route(web::get().to(info)));
}
