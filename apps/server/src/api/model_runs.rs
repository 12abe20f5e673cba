//! Model run API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ListModelRunsQuery, ModelRunDetailResponse, ModelRunListResponse, ModelRunResponse,
};

/// List model runs, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/model-runs",
    tag = "Model Runs",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("limit" = Option<u64>, Query, description = "Runs per page (default 50, max 500)"),
        ("offset" = Option<u64>, Query, description = "Pagination offset")
    ),
    responses(
        (status = 200, description = "Model runs", body = ModelRunListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn list_model_runs(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    query: web::Query<ListModelRunsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let (runs, total) = pool
        .list_model_runs(
            query.status.as_deref(),
            query.clamped_limit(),
            query.offset,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ModelRunListResponse {
        success: true,
        model_runs: runs.into_iter().map(ModelRunResponse::from).collect(),
        total,
    }))
}

/// Get one model run.
#[utoipa::path(
    get,
    path = "/api/v1/model-runs/{id}",
    tag = "Model Runs",
    params(
        ("id" = Uuid, Path, description = "Model run UUID")
    ),
    responses(
        (status = 200, description = "Model run", body = ModelRunDetailResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Model run not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn get_model_run(
    _auth: AdminAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let run = pool
        .get_model_run_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Model run {}", id)))?;

    Ok(HttpResponse::Ok().json(ModelRunDetailResponse {
        success: true,
        model_run: ModelRunResponse::from(run),
    }))
}

/// Configure model run routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/model-runs").route(web::get().to(list_model_runs)))
        .service(web::resource("/model-runs/{id}").route(web::get().to(get_model_run)));
}
