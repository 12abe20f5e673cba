//! Address normalization preview tests.

use actix_web::test;
use printdesk_lib::models::{NormalizeAddressResponse, ShippingAddress};

use super::test_helpers::*;

async fn preview(body: serde_json::Value) -> (u16, serde_json::Value) {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/addresses/normalize")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(body)
        .to_request();
    call_json(&app, req).await
}

#[actix_rt::test]
async fn test_preview_normalizes_all_fields() {
    let (status, body) = preview(serde_json::json!({
        "name": "  mary-kate  o'brien ",
        "address1": " 12   main st ",
        "address2": "   ",
        "city": "new   york",
        "state": " new york ",
        "zip": " 10001 ",
    }))
    .await;

    assert_eq!(status, 200);
    let parsed: NormalizeAddressResponse = serde_json::from_value(body).unwrap();
    assert!(parsed.success);
    assert_eq!(
        parsed.address,
        ShippingAddress {
            name: "Mary-Kate O'Brien".to_string(),
            line1: "12 main st".to_string(),
            line2: None,
            city: "New York".to_string(),
            state: "NY".to_string(),
            postal_code: "10001".to_string(),
            country: Some("US".to_string()),
        }
    );
}

#[actix_rt::test]
async fn test_preview_is_idempotent() {
    let (_, first) = preview(serde_json::json!({
        "name": "ronald mcdonald",
        "line1": "1 Elm",
        "city": "macon",
        "state": "georgia",
        "postal_code": "31201",
        "country": "us",
    }))
    .await;
    assert_eq!(first["address"]["name"], "Ronald McDonald");
    assert_eq!(first["address"]["city"], "Macon");
    assert_eq!(first["address"]["state"], "GA");

    let (_, second) = preview(first["address"].clone()).await;
    assert_eq!(first["address"], second["address"]);
}

#[actix_rt::test]
async fn test_preview_rejects_malformed_json() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/addresses/normalize")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_malformed_id_uses_error_envelope() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;
    for uri in [
        "/api/v1/physical-mail-orders/not-a-uuid",
        "/api/v1/model-runs/12345",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
            .to_request();
        let (status, body) = call_json(&app, req).await;

        assert_eq!(status, 400, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert_eq!(body["error"], "INVALID_INPUT", "{uri}");
    }
}
