//! Profile services - core business logic

use std::sync::Arc;

use encore_domain::{
    EncoreError, FileUpload, PhotoField, Profile, ProfileChanges, ProfileUpsertRequest, Result,
};
use tracing::{debug, warn};

use super::ports::{FileStore, ProfileRepository, UserRepository};
use super::validation;

/// Storage namespace for profile and cover photos
const PHOTO_NAMESPACE: &str = "profile";

/// Profile upsert and retrieval service
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(users: Arc<dyn UserRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { users, profiles }
    }

    /// Get a profile by its id
    pub async fn get_profile(&self, id: i64) -> Result<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or_else(|| EncoreError::NotFound(format!("profile {id} not found")))
    }

    /// Validate and upsert a profile keyed by the request's `user_id`.
    ///
    /// Validation runs fully before any lookup or write; a failing request
    /// mutates nothing. Fields outside the active variant are retained by
    /// the merge-upsert.
    pub async fn upsert_profile(&self, request: &ProfileUpsertRequest) -> Result<Profile> {
        let input = validation::validate_upsert(request).map_err(EncoreError::Validation)?;

        let user_id = input.user_id();
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EncoreError::NotFound(format!("user {user_id} not found")))?;

        let profile = self.profiles.upsert(input.into_changes()).await?;
        debug!(user_id, profile_id = profile.id, "profile upserted");
        Ok(profile)
    }
}

/// Photo replacement service
///
/// Stores the new file, deletes the previously referenced file best-effort,
/// and updates exactly one profile field.
pub struct PhotoService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    files: Arc<dyn FileStore>,
}

impl PhotoService {
    /// Create a new photo service
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileRepository>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self { users, profiles, files }
    }

    /// Replace the photo stored in `field` for `user_id`.
    ///
    /// The new file is stored before the old one is deleted, so a storage
    /// failure never leaves the profile without a valid file. A failed
    /// deletion of the old file is logged and otherwise ignored.
    pub async fn replace_photo(
        &self,
        user_id: i64,
        upload: &FileUpload,
        field: PhotoField,
    ) -> Result<Profile> {
        validation::validate_photo_upload(Some(upload), field)
            .map_err(EncoreError::Validation)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| EncoreError::NotFound(format!("user {user_id} not found")))?;

        let reference = self.files.store(upload, PHOTO_NAMESPACE).await?;

        let previous = self
            .profiles
            .find_by_user_id(user_id)
            .await?
            .and_then(|profile| match field {
                PhotoField::CoverPhoto => profile.cover_photo,
                PhotoField::ProfilePhoto => profile.profile_photo,
            });

        if let Some(old_reference) = previous {
            self.remove_old_photo(&old_reference).await;
        }

        let changes = ProfileChanges::photo(user_id, field, reference);
        let profile = self.profiles.upsert(changes).await?;
        debug!(user_id, field = field.field_name(), "photo replaced");
        Ok(profile)
    }

    /// Best-effort removal of a superseded photo file.
    async fn remove_old_photo(&self, reference: &str) {
        match self.files.exists(reference).await {
            Ok(true) => {
                if let Err(err) = self.files.delete(reference).await {
                    warn!(reference, error = %err, "failed to delete previous photo");
                }
            }
            Ok(false) => {}
            Err(err) => {
                warn!(reference, error = %err, "could not check previous photo");
            }
        }
    }
}
