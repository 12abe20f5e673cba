//! OpenAPI document tests.

use printdesk_lib::api::ApiDoc;
use utoipa::OpenApi;

#[test]
fn test_openapi_lists_admin_routes() {
    let doc = ApiDoc::openapi();
    let paths: Vec<&String> = doc.paths.paths.keys().collect();

    for expected in [
        "/api/v1/health",
        "/api/v1/orders",
        "/api/v1/orders/{payment_id}",
        "/api/v1/print-orders/{payment_id}",
        "/api/v1/print-orders/{payment_id}/batch",
        "/api/v1/batches",
        "/api/v1/batches/{batch_id}",
        "/api/v1/addresses/normalize",
        "/api/v1/physical-mail-orders/{id}",
        "/api/v1/physical-mail-orders/{id}/address",
        "/api/v1/physical-mail-orders/{id}/tracking",
        "/api/v1/model-runs",
        "/api/v1/model-runs/{id}",
        "/api/v1/sticker-sheets",
        "/api/v1/uploads",
        "/api/v1/notifications/email",
        "/api/v1/admin-profiles/{name}",
    ] {
        assert!(
            paths.iter().any(|p| p.as_str() == expected),
            "missing path {}",
            expected
        );
    }
}

#[test]
fn test_openapi_declares_admin_key_scheme() {
    let doc = ApiDoc::openapi();
    let components = doc.components.expect("components");
    assert!(components.security_schemes.contains_key("admin_key"));
}
