//! Email endpoint tests without a configured mail API.

use actix_web::test;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_email_disabled_without_mail_settings() {
    let app = create_test_app(Some(TEST_ADMIN_KEY)).await;
    let boundary = "printdesk-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("to", "buyer@example.com"),
            ("subject", "Shipped"),
            ("body", "Your stickers are on the way."),
        ],
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/notifications/email")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        ))
        .set_payload(body)
        .to_request();
    let (status, body) = call_json(&app, req).await;

    assert_eq!(status, 503);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "MAIL_DISABLED");
}
