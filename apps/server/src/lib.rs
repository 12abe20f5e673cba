//! Printdesk server library.
//!
//! Admin back end for a print-on-demand sticker shop: combined order views,
//! print and shipping management, sticker sheet compositing and customer
//! email.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
