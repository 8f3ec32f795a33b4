//! # Encore Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite via an r2d2 pool)
//! - Local filesystem file storage
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `encore-core`
//! - Contains all "impure" code (database, filesystem)

pub mod config;
pub mod database;
pub mod errors;
pub mod storage;

// Re-export commonly used items
pub use database::{DbManager, SqliteProfileRepository, SqliteUserRepository};
pub use errors::InfraError;
pub use storage::LocalFileStore;
