//! Domain types and models

pub mod profile;
pub mod upload;
pub mod user;

// Re-export profile types for convenience
pub use profile::{
    AudienceInput, PerformerInput, PhotoField, Profile, ProfileChanges, ProfileInput, ProfileType,
    ProfileUpsertRequest, SocialLinks,
};
pub use upload::FileUpload;
pub use user::User;
