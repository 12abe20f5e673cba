//! Physical mail order and address API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    NormalizeAddressResponse, PhysicalMailOrderResponse, ShippingAddress, UpdateTrackingRequest,
};
use crate::services::address::normalize_address;

/// Preview how an address would be stored.
#[utoipa::path(
    post,
    path = "/api/v1/addresses/normalize",
    tag = "Physical Mail Orders",
    request_body = ShippingAddress,
    responses(
        (status = 200, description = "Normalized address", body = NormalizeAddressResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn preview_address(
    _auth: AdminAuth,
    body: web::Json<ShippingAddress>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(NormalizeAddressResponse {
        success: true,
        address: normalize_address(&body),
    }))
}

/// Get a physical mail order.
#[utoipa::path(
    get,
    path = "/api/v1/physical-mail-orders/{id}",
    tag = "Physical Mail Orders",
    params(
        ("id" = Uuid, Path, description = "Mail order UUID")
    ),
    responses(
        (status = 200, description = "Mail order", body = PhysicalMailOrderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Mail order not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn get_mail_order(
    _auth: AdminAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let order = pool
        .get_mail_order_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Physical mail order {}", id)))?;

    Ok(HttpResponse::Ok().json(PhysicalMailOrderResponse::from(order)))
}

/// Normalize and store a new shipping address.
#[utoipa::path(
    put,
    path = "/api/v1/physical-mail-orders/{id}/address",
    tag = "Physical Mail Orders",
    params(
        ("id" = Uuid, Path, description = "Mail order UUID")
    ),
    request_body = ShippingAddress,
    responses(
        (status = 200, description = "Updated mail order", body = PhysicalMailOrderResponse),
        (status = 400, description = "Incomplete address", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Mail order not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn update_address(
    _auth: AdminAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
    body: web::Json<ShippingAddress>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let address = normalize_address(&body);

    if address.line1.is_empty() || address.city.is_empty() || address.postal_code.is_empty() {
        return Err(AppError::InvalidInput(
            "line1, city and postal_code are required".to_string(),
        ));
    }

    let order = pool.update_shipping_address(id, address.to_json()).await?;

    info!(mail_order_id = %id, payment_id = %order.payment_id, "Shipping address updated");

    Ok(HttpResponse::Ok().json(PhysicalMailOrderResponse::from(order)))
}

/// Set tracking number and carrier.
#[utoipa::path(
    put,
    path = "/api/v1/physical-mail-orders/{id}/tracking",
    tag = "Physical Mail Orders",
    params(
        ("id" = Uuid, Path, description = "Mail order UUID")
    ),
    request_body = UpdateTrackingRequest,
    responses(
        (status = 200, description = "Updated mail order", body = PhysicalMailOrderResponse),
        (status = 400, description = "Missing tracking number or carrier", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Mail order not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("admin_key" = [])
    )
)]
pub async fn update_tracking(
    _auth: AdminAuth,
    path: web::Path<Uuid>,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateTrackingRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let tracking_number = req.tracking_number.trim().to_string();
    let carrier = req.carrier.trim().to_string();
    if tracking_number.is_empty() || carrier.is_empty() {
        return Err(AppError::InvalidInput(
            "tracking_number and carrier are required".to_string(),
        ));
    }

    let order = pool
        .update_tracking(id, tracking_number, carrier, req.shipping_status)
        .await?;

    info!(
        mail_order_id = %id,
        shipping_status = %order.shipping_status,
        "Tracking updated"
    );

    Ok(HttpResponse::Ok().json(PhysicalMailOrderResponse::from(order)))
}

/// Configure mail order routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/addresses/normalize").route(web::post().to(preview_address)))
        .service(web::resource("/physical-mail-orders/{id}").route(web::get().to(get_mail_order)))
        .service(
            web::resource("/physical-mail-orders/{id}/address")
                .route(web::put().to(update_address)),
        )
        .service(
            web::resource("/physical-mail-orders/{id}/tracking")
                .route(web::put().to(update_tracking)),
        );
}
