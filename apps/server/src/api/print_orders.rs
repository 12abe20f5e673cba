//! Print order management API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{PrintOrderResponse, UpdatePrintOrderRequest};

/// Update status, visibility or notes of a payment's print record.
///
/// Creates the record on first use.
#[utoipa::path(
    patch,
    path = "/api/v1/print-orders/{payment_id}",
    tag = "Print Orders",
    params(
        ("payment_id" = String, Path, description = "Payment id")
    ),
    request_body = UpdatePrintOrderRequest,
    responses(
        (status = 200, description = "Updated print record", body = PrintOrderResponse),
        (status = 400, description = "Empty or invalid update", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn update_print_order(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<UpdatePrintOrderRequest>,
) -> AppResult<HttpResponse> {
    let payment_id = path.into_inner();
    let update = body.into_inner();

    if payment_id.trim().is_empty() {
        return Err(AppError::InvalidInput("payment_id is required".to_string()));
    }
    if update.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one of status, is_visible or notes is required".to_string(),
        ));
    }

    let record = pool.upsert_print_order(&payment_id, &update).await?;

    info!(
        payment_id = %payment_id,
        status = %record.status,
        is_visible = record.is_visible,
        "Print order updated"
    );

    Ok(HttpResponse::Ok().json(PrintOrderResponse::from(record)))
}

/// Get a payment's print record.
#[utoipa::path(
    get,
    path = "/api/v1/print-orders/{payment_id}",
    tag = "Print Orders",
    params(
        ("payment_id" = String, Path, description = "Payment id")
    ),
    responses(
        (status = 200, description = "Print record", body = PrintOrderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "No print record", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn get_print_order(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let payment_id = path.into_inner();
    let record = pool
        .get_print_order(&payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Print order for payment {}", payment_id)))?;

    Ok(HttpResponse::Ok().json(PrintOrderResponse::from(record)))
}

/// Configure print order routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/print-orders/{payment_id}")
            .route(web::get().to(get_print_order))
            .route(web::patch().to(update_print_order)),
    );
}
