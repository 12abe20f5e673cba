//! Shipping batch API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::batch::{group_batches, validate_batch_id};
use crate::models::{
    AssignBatchRequest, BatchAssignResponse, BatchListResponse, BatchReleaseResponse, BatchSummary,
    PrintOrderResponse,
};

/// List all batches with their member payment ids.
#[utoipa::path(
    get,
    path = "/api/v1/batches",
    tag = "Batches",
    responses(
        (status = 200, description = "Batches sorted by id", body = BatchListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn list_batches(_auth: AdminAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let rows = pool.list_batch_members().await?;

    Ok(HttpResponse::Ok().json(BatchListResponse {
        success: true,
        batches: group_batches(rows),
    }))
}

/// Assign payments to a batch.
///
/// Payments already in another batch are moved.
#[utoipa::path(
    put,
    path = "/api/v1/batches/{batch_id}",
    tag = "Batches",
    params(
        ("batch_id" = String, Path, description = "Batch id ([A-Za-z0-9_-], 1-64 chars)")
    ),
    request_body = AssignBatchRequest,
    responses(
        (status = 200, description = "Batch after assignment", body = BatchAssignResponse),
        (status = 400, description = "Invalid batch id or payment ids", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn assign_batch(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<AssignBatchRequest>,
) -> AppResult<HttpResponse> {
    let batch_id = path.into_inner();
    validate_batch_id(&batch_id)?;
    let payment_ids = body.normalized_payment_ids()?;

    pool.assign_batch(&batch_id, &payment_ids).await?;

    let members: Vec<String> = pool
        .list_batch_members()
        .await?
        .into_iter()
        .filter(|(batch, _)| *batch == batch_id)
        .map(|(_, payment_id)| payment_id)
        .collect();

    info!(
        batch_id = %batch_id,
        assigned = payment_ids.len(),
        members = members.len(),
        "Batch assigned"
    );

    Ok(HttpResponse::Ok().json(BatchAssignResponse {
        success: true,
        batch: BatchSummary::new(batch_id, members),
    }))
}

/// Release every member of a batch.
#[utoipa::path(
    delete,
    path = "/api/v1/batches/{batch_id}",
    tag = "Batches",
    params(
        ("batch_id" = String, Path, description = "Batch id")
    ),
    responses(
        (status = 200, description = "Batch released", body = BatchReleaseResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Batch has no members", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn release_batch(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let batch_id = path.into_inner();
    validate_batch_id(&batch_id)?;

    let released = pool.release_batch(&batch_id).await?;
    if released == 0 {
        return Err(AppError::NotFound(format!("Batch {}", batch_id)));
    }

    info!(batch_id = %batch_id, released, "Batch released");

    Ok(HttpResponse::Ok().json(BatchReleaseResponse {
        success: true,
        batch_id,
        released,
    }))
}

/// Remove one payment from its batch.
#[utoipa::path(
    delete,
    path = "/api/v1/print-orders/{payment_id}/batch",
    tag = "Batches",
    params(
        ("payment_id" = String, Path, description = "Payment id")
    ),
    responses(
        (status = 200, description = "Print record without batch", body = PrintOrderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "No print record", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn release_from_batch(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let payment_id = path.into_inner();
    let record = pool.release_from_batch(&payment_id).await?;

    info!(payment_id = %payment_id, "Payment removed from batch");

    Ok(HttpResponse::Ok().json(PrintOrderResponse::from(record)))
}

/// Configure batch routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/batches").route(web::get().to(list_batches)))
        .service(
            web::resource("/batches/{batch_id}")
                .route(web::put().to(assign_batch))
                .route(web::delete().to(release_batch)),
        )
        .service(
            web::resource("/print-orders/{payment_id}/batch")
                .route(web::delete().to(release_from_batch)),
        );
}
