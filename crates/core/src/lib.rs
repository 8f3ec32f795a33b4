//! # Encore Core
//!
//! Business logic for the Encore profile service.
//!
//! This crate contains:
//! - Profile upsert and photo replacement services
//! - Port traits implemented by the infra crate
//! - Request validation
//!
//! ## Architecture
//! - Depends only on `encore-domain`
//! - All I/O goes through port traits; no direct database or filesystem
//!   access

pub mod profile;

// Re-export commonly used items
pub use profile::ports::{FileStore, ProfileRepository, UserRepository};
pub use profile::service::{PhotoService, ProfileService};
