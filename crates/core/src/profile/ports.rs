//! Port interfaces for profile management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for profile operations.

use async_trait::async_trait;
use encore_domain::{FileUpload, Profile, ProfileChanges, Result, User};

/// Trait for user identity lookup
///
/// Users are created elsewhere; this service only resolves them.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// Trait for profile persistence and retrieval
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get a profile by its own id
    async fn find_by_id(&self, id: i64) -> Result<Option<Profile>>;

    /// Get a profile by owning user id
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Profile>>;

    /// Create-or-merge a profile keyed by `user_id`.
    ///
    /// Must be a single logical write: concurrent upserts for the same
    /// `user_id` may not produce duplicate rows. Fields the patch leaves as
    /// `None` keep their stored value.
    async fn upsert(&self, changes: ProfileChanges) -> Result<Profile>;
}

/// Trait for stored-file management
///
/// References are opaque strings (relative paths) produced by `store` and
/// accepted by `exists`/`delete`.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist an upload under a namespace, returning its reference
    async fn store(&self, upload: &FileUpload, namespace: &str) -> Result<String>;

    /// Whether a physical file exists at the reference
    async fn exists(&self, reference: &str) -> Result<bool>;

    /// Remove the physical file at the reference
    async fn delete(&self, reference: &str) -> Result<()>;
}
