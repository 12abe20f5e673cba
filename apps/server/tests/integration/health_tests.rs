//! Health endpoint tests.

use actix_web::test;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_is_public() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_rt::test]
async fn test_info_reports_version() {
    let app = create_test_app(None).await;

    let req = test::TestRequest::get().uri("/api/v1/info").to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["name"], "printdesk-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}
