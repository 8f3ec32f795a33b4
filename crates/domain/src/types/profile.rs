//! Profile types
//!
//! A user has at most one profile, keyed by `user_id`. Profiles come in two
//! variants (performer and audience) with distinct required fields; the
//! stored record holds the superset of both so a variant switch retains the
//! other variant's fields.

use serde::{Deserialize, Serialize};

/// Profile variant discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileType {
    #[serde(rename = "PERFORMER")]
    Performer,
    #[serde(rename = "AUDIENCE")]
    Audience,
}

impl ProfileType {
    /// Wire/storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performer => "PERFORMER",
            Self::Audience => "AUDIENCE",
        }
    }

    /// Parse the storage representation
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PERFORMER" => Some(Self::Performer),
            "AUDIENCE" => Some(Self::Audience),
            _ => None,
        }
    }
}

/// Stored profile record
///
/// Array-valued fields are decoded from their persisted JSON text by the
/// repository, so consumers always see plain vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    /// None until the first typed upsert; a photo upload may create the row
    /// before any variant data exists.
    #[serde(rename = "type")]
    pub profile_type: Option<ProfileType>,
    pub stage_name: Option<String>,
    pub about_you: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub interested_in: Vec<String>,
    pub organization_type: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub cover_photo: Option<String>,
    pub profile_photo: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// The profile field a photo replacement targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoField {
    CoverPhoto,
    ProfilePhoto,
}

impl PhotoField {
    /// Input/column name of the targeted field
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::CoverPhoto => "cover_photo",
            Self::ProfilePhoto => "profile_photo",
        }
    }
}

/// Optional social links shared by both variants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Validated performer upsert input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerInput {
    pub user_id: i64,
    pub stage_name: String,
    pub about_you: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub social: SocialLinks,
}

/// Validated audience upsert input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceInput {
    pub user_id: i64,
    pub name: String,
    pub interested_in: Vec<String>,
    pub organization_type: String,
    #[serde(flatten)]
    pub social: SocialLinks,
}

/// Validated upsert input, one shape per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProfileInput {
    Performer(PerformerInput),
    Audience(AudienceInput),
}

impl ProfileInput {
    /// Owning user id
    pub fn user_id(&self) -> i64 {
        match self {
            Self::Performer(input) => input.user_id,
            Self::Audience(input) => input.user_id,
        }
    }

    /// Convert into a repository patch.
    ///
    /// Only the fields of the active variant (plus any provided social
    /// links) are set; everything else stays `None` and is retained by the
    /// merge-upsert.
    pub fn into_changes(self) -> ProfileChanges {
        match self {
            Self::Performer(input) => ProfileChanges {
                user_id: input.user_id,
                profile_type: Some(ProfileType::Performer),
                stage_name: Some(input.stage_name),
                about_you: Some(input.about_you),
                categories: Some(input.categories),
                tags: Some(input.tags),
                facebook: input.social.facebook,
                twitter: input.social.twitter,
                linkedin: input.social.linkedin,
                instagram: input.social.instagram,
                ..ProfileChanges::empty(input.user_id)
            },
            Self::Audience(input) => ProfileChanges {
                user_id: input.user_id,
                profile_type: Some(ProfileType::Audience),
                name: Some(input.name),
                interested_in: Some(input.interested_in),
                organization_type: Some(input.organization_type),
                facebook: input.social.facebook,
                twitter: input.social.twitter,
                linkedin: input.social.linkedin,
                instagram: input.social.instagram,
                ..ProfileChanges::empty(input.user_id)
            },
        }
    }
}

/// Field patch applied by the upsert primitive.
///
/// `None` means "leave the stored value as-is"; the repository merges with
/// `COALESCE` so a patch never clears a field it does not mention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub user_id: i64,
    pub profile_type: Option<ProfileType>,
    pub stage_name: Option<String>,
    pub about_you: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub name: Option<String>,
    pub interested_in: Option<Vec<String>>,
    pub organization_type: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub cover_photo: Option<String>,
    pub profile_photo: Option<String>,
}

impl ProfileChanges {
    /// Patch that touches nothing beyond the row key
    pub fn empty(user_id: i64) -> Self {
        Self { user_id, ..Self::default() }
    }

    /// Patch updating a single photo field
    pub fn photo(user_id: i64, field: PhotoField, reference: String) -> Self {
        let mut changes = Self::empty(user_id);
        match field {
            PhotoField::CoverPhoto => changes.cover_photo = Some(reference),
            PhotoField::ProfilePhoto => changes.profile_photo = Some(reference),
        }
        changes
    }
}

/// Raw upsert request as received on the wire.
///
/// Everything is optional here; the validation layer decides which fields
/// are required based on `type`. Any `type` value other than `PERFORMER`
/// selects the audience rule set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpsertRequest {
    pub user_id: Option<i64>,
    #[serde(rename = "type")]
    pub profile_type: Option<String>,
    pub stage_name: Option<String>,
    pub about_you: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub name: Option<String>,
    pub interested_in: Option<Vec<String>>,
    pub organization_type: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}
