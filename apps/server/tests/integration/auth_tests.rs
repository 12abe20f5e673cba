//! Admin key guard tests.
//!
//! The guard runs before any database access, so every protected route can
//! be checked without a database.

use actix_web::test;

use super::test_helpers::*;

const PROTECTED: &[(&str, &str)] = &[
    ("GET", "/api/v1/orders"),
    ("GET", "/api/v1/orders/pi_123"),
    ("GET", "/api/v1/print-orders/pi_123"),
    ("PATCH", "/api/v1/print-orders/pi_123"),
    ("GET", "/api/v1/batches"),
    ("PUT", "/api/v1/batches/b-1"),
    ("DELETE", "/api/v1/batches/b-1"),
    ("DELETE", "/api/v1/print-orders/pi_123/batch"),
    ("POST", "/api/v1/addresses/normalize"),
    ("GET", "/api/v1/physical-mail-orders/0190b0d6-0000-7000-8000-000000000000"),
    ("GET", "/api/v1/model-runs"),
    ("POST", "/api/v1/sticker-sheets"),
    ("POST", "/api/v1/uploads"),
    ("POST", "/api/v1/notifications/email"),
    ("GET", "/api/v1/admin-profiles/sam"),
    ("PUT", "/api/v1/admin-profiles/sam"),
];

fn request(method: &str, uri: &str) -> test::TestRequest {
    let req = match method {
        "GET" => test::TestRequest::get(),
        "POST" => test::TestRequest::post(),
        "PUT" => test::TestRequest::put(),
        "PATCH" => test::TestRequest::patch(),
        "DELETE" => test::TestRequest::delete(),
        other => panic!("unsupported method {}", other),
    };
    req.uri(uri)
}

#[actix_rt::test]
async fn test_missing_key_returns_401() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;

    for (method, uri) in PROTECTED {
        let (status, body) = call_json(&app, request(method, uri).to_request()).await;
        assert_eq!(status, 401, "{} {} should require a key", method, uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "UNAUTHORIZED");
    }
}

#[actix_rt::test]
async fn test_wrong_key_returns_401() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;

    for (method, uri) in PROTECTED {
        let req = request(method, uri)
            .insert_header(("X-Admin-Key", "wrong-key"))
            .to_request();
        let (status, body) = call_json(&app, req).await;
        assert_eq!(status, 401, "{} {} accepted a wrong key", method, uri);
        assert!(body["message"].as_str().unwrap().contains("Invalid admin key"));
    }
}

#[actix_rt::test]
async fn test_unconfigured_key_rejects_everything() {
    let app = create_test_app(None).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/orders")
        .insert_header(("X-Admin-Key", ""))
        .to_request();
    let (status, _) = call_json(&app, req).await;

    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_valid_key_passes_guard() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/addresses/normalize")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({ "name": "ada", "state": "ny" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}
