//! # Encore API
//!
//! HTTP surface of the Encore profile service.
//!
//! This crate contains:
//! - The axum router and request handlers
//! - The application context wiring services to their infra backends
//! - Response envelope and error mapping

pub mod context;
pub mod handlers;
pub mod response;
pub mod routes;

// Re-export commonly used items
pub use context::AppContext;
pub use response::{ApiFailure, ApiJson, ApiResponse};
