//! Shared helpers for integration tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use printdesk_lib::api::{self, MaxUploadSize};
use printdesk_lib::auth::AdminKey;
use serde_json::Value;

/// Admin key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-integration";

/// Upload limit used in tests.
pub const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// Create a test app without database, storage or mailer.
pub async fn create_test_app(
    admin_key: Option<&str>,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let admin_key = AdminKey::new(admin_key.map(String::from));

    test::init_service(
        App::new()
            .app_data(web::Data::new(admin_key))
            .app_data(web::Data::new(MaxUploadSize(TEST_MAX_UPLOAD_SIZE)))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(api::path_config())
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_admin_routes),
            ),
    )
    .await
}

/// Send a request and return status plus JSON body.
pub async fn call_json<S>(app: &S, req: actix_http::Request) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Build a multipart/form-data body from text fields.
pub fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}
