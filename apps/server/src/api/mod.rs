//! API endpoint modules.

pub mod admin_profiles;
pub mod batches;
pub mod health;
pub mod mail_orders;
pub mod model_runs;
pub mod multipart;
pub mod notifications;
pub mod openapi;
pub mod orders;
pub mod print_orders;
pub mod sticker_sheets;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use multipart::MaxUploadSize;
pub use openapi::ApiDoc;

/// Register every admin route under the current scope.
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(orders::configure_routes)
        .configure(print_orders::configure_routes)
        .configure(batches::configure_routes)
        .configure(mail_orders::configure_routes)
        .configure(model_runs::configure_routes)
        .configure(sticker_sheets::configure_routes)
        .configure(notifications::configure_routes)
        .configure(admin_profiles::configure_routes);
}

/// Render JSON body errors in the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Render malformed path segments (such as a bad UUID) in the standard
/// error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Render query string errors in the standard error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}
