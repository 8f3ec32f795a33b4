//! # Encore Domain
//!
//! Business domain types and models for the Encore profile service.
//!
//! This crate contains:
//! - Domain data types (Profile, User, FileUpload, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Encore crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
