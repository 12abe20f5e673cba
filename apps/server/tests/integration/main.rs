//! HTTP integration tests.
//!
//! Exercise the routes that need no database or object store: health, the
//! admin key guard, address preview and request validation.
//!
//! Run with: cargo test --test integration

mod test_helpers;

mod address_tests;
mod auth_tests;
mod health_tests;
mod notification_tests;
mod openapi_tests;
