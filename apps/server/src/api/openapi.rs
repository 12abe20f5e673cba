//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::config::ADMIN_KEY_HEADER;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Printdesk Server",
        version = "0.3.0",
        description = "Admin API for sticker orders: order review, print status, batches, shipping, sticker sheets and customer email"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        api::health::info,
        // Orders
        api::orders::list_orders,
        api::orders::get_order,
        // Print orders
        api::print_orders::update_print_order,
        api::print_orders::get_print_order,
        // Batches
        api::batches::list_batches,
        api::batches::assign_batch,
        api::batches::release_batch,
        api::batches::release_from_batch,
        // Physical mail orders
        api::mail_orders::preview_address,
        api::mail_orders::get_mail_order,
        api::mail_orders::update_address,
        api::mail_orders::update_tracking,
        // Model runs
        api::model_runs::list_model_runs,
        api::model_runs::get_model_run,
        // Sticker sheets and uploads
        api::sticker_sheets::create_sticker_sheet,
        api::sticker_sheets::upload_image,
        // Notifications
        api::notifications::send_email,
        // Admin profiles
        api::admin_profiles::get_profile,
        api::admin_profiles::upsert_profile,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            api::health::ServerInfoResponse,
            // Orders
            models::CombinedOrder,
            models::ListOrdersQuery,
            models::OrderListResponse,
            models::OrderDetailResponse,
            // Print orders
            models::PrintStatus,
            models::UpdatePrintOrderRequest,
            models::PrintOrderResponse,
            // Batches
            models::AssignBatchRequest,
            models::BatchSummary,
            models::BatchAssignResponse,
            models::BatchListResponse,
            models::BatchReleaseResponse,
            // Physical mail orders
            models::ShippingAddress,
            models::ShippingStatus,
            models::UpdateTrackingRequest,
            models::PhysicalMailOrderResponse,
            models::NormalizeAddressResponse,
            // Model runs
            models::ListModelRunsQuery,
            models::ModelRunResponse,
            models::ModelRunDetailResponse,
            models::ModelRunListResponse,
            // Sticker sheets
            models::StickerLayout,
            models::CreateStickerSheetRequest,
            models::StickerSheetResponse,
            models::UploadResponse,
            models::sticker::UploadForm,
            // Notifications
            models::notification::EmailForm,
            models::EmailSentResponse,
            // Admin profiles
            models::UpsertAdminProfileRequest,
            models::AdminProfileResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Orders", description = "Payments joined with fulfilment data"),
        (name = "Print Orders", description = "Print status, visibility and notes"),
        (name = "Batches", description = "Shipping batch grouping"),
        (name = "Physical Mail Orders", description = "Shipping addresses and tracking"),
        (name = "Model Runs", description = "Image generation runs"),
        (name = "Sticker Sheets", description = "Sheet compositing and image uploads"),
        (name = "Notifications", description = "Customer email"),
        (name = "Admin Profiles", description = "Saved staff view settings")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add admin key security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(ADMIN_KEY_HEADER),
                    ),
                ),
            );
        }
    }
}
