//! Combined order API handlers.

use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ListOrdersQuery, OrderDetailResponse, OrderListResponse};
use crate::services::reconcile;

/// List orders joined with their mail order, model run and print record.
///
/// Secondary tables that fail to load are reported in `warnings` and leave
/// their fields null instead of failing the request.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    params(
        ("limit" = Option<u64>, Query, description = "Orders per page (default 100, max 500)"),
        ("offset" = Option<u64>, Query, description = "Pagination offset"),
        ("include_hidden" = Option<bool>, Query, description = "Include hidden orders"),
        ("shipping_status" = Option<String>, Query, description = "Filter by mail order shipping status"),
        ("batch_id" = Option<String>, Query, description = "Filter by batch"),
        ("has_physical_order" = Option<bool>, Query, description = "Filter by presence of a mail order")
    ),
    responses(
        (status = 200, description = "Combined orders", body = OrderListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn list_orders(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    query: web::Query<ListOrdersQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let (reconciled, total) = reconcile::load_orders(&pool, &query).await?;

    debug!(
        returned = reconciled.orders.len(),
        total,
        warnings = reconciled.warnings.len(),
        "Listed orders"
    );

    Ok(HttpResponse::Ok().json(OrderListResponse {
        success: true,
        orders: reconciled.orders,
        total,
        warnings: reconciled.warnings,
    }))
}

/// Get one combined order by payment id.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{payment_id}",
    tag = "Orders",
    params(
        ("payment_id" = String, Path, description = "Payment id")
    ),
    responses(
        (status = 200, description = "Combined order", body = OrderDetailResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn get_order(
    _auth: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let payment_id = path.into_inner();
    let (order, warnings) = reconcile::load_order(&pool, &payment_id).await?;

    Ok(HttpResponse::Ok().json(OrderDetailResponse {
        success: true,
        order,
        warnings,
    }))
}

/// Configure order routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/orders").route(web::get().to(list_orders)))
        .service(web::resource("/orders/{payment_id}").route(web::get().to(get_order)));
}
