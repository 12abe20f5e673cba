//! Access log middleware. Every request produces one completion event under
//! target `api`, levelled by response status.

use std::future::{Ready, ready};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, info, warn};

use crate::config::ADMIN_KEY_HEADER;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

/// What gets logged about a request. The admin key itself is never kept.
struct AccessEntry {
    method: String,
    path: String,
    remote_addr: String,
    has_admin_key: bool,
}

impl AccessEntry {
    fn from_request(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            remote_addr: req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string(),
            has_admin_key: req.headers().contains_key(ADMIN_KEY_HEADER),
        }
    }

    fn finish(&self, status: StatusCode, elapsed: Duration) {
        let status_code = status.as_u16();
        let duration_ms = elapsed.as_millis() as u64;
        let (method, path, remote_addr) = (&self.method, &self.path, &self.remote_addr);

        if status.is_server_error() {
            error!(target: "api", %method, %path, status_code, duration_ms, %remote_addr, "request failed");
        } else if status.is_client_error() {
            warn!(
                target: "api",
                %method,
                %path,
                status_code,
                duration_ms,
                %remote_addr,
                has_admin_key = self.has_admin_key,
                "request rejected"
            );
        } else {
            info!(target: "api", %method, %path, status_code, duration_ms, %remote_addr, "request served");
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let entry = AccessEntry::from_request(&req);
        debug!(target: "api", method = %entry.method, path = %entry.path, query = %req.query_string(), "request received");

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            entry.finish(res.status(), started.elapsed());
            Ok(res)
        })
    }
}
