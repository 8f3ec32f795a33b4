//! Profile repository implementation using SQLite
//!
//! The upsert is a single `INSERT .. ON CONFLICT(user_id) DO UPDATE`
//! statement so concurrent upserts for the same user cannot create duplicate
//! rows; the `UNIQUE` constraint on `user_id` resolves the race. Fields the
//! patch leaves as `None` keep their stored value via `COALESCE`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use encore_core::ProfileRepository as ProfileRepositoryPort;
use encore_domain::{EncoreError, Profile, ProfileChanges, ProfileType, Result as DomainResult};
use rusqlite::{params, Row};
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite-backed implementation of `ProfileRepository`
pub struct SqliteProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteProfileRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepositoryPort for SqliteProfileRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Profile>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Profile>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, user_id, profile_type, stage_name, about_you, categories, tags,
                        name, interested_in, organization_type, facebook, twitter, linkedin,
                        instagram, cover_photo, profile_photo, created_at, updated_at
                 FROM profiles WHERE id = ?1",
                params![id],
                map_profile_row,
            );

            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Profile>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Profile>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, user_id, profile_type, stage_name, about_you, categories, tags,
                        name, interested_in, organization_type, facebook, twitter, linkedin,
                        instagram, cover_photo, profile_photo, created_at, updated_at
                 FROM profiles WHERE user_id = ?1",
                params![user_id],
                map_profile_row,
            );

            match result {
                Ok(profile) => Ok(Some(profile)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn upsert(&self, changes: ProfileChanges) -> DomainResult<Profile> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Profile> {
            let conn = db.get_connection()?;
            let now = Utc::now().timestamp();

            let profile_type = changes.profile_type.map(ProfileType::as_str);
            let categories = encode_tags(changes.categories.as_ref())?;
            let tags = encode_tags(changes.tags.as_ref())?;
            let interested_in = encode_tags(changes.interested_in.as_ref())?;

            conn.execute(
                "INSERT INTO profiles (
                    user_id, profile_type, stage_name, about_you, categories, tags,
                    name, interested_in, organization_type, facebook, twitter, linkedin,
                    instagram, cover_photo, profile_photo, created_at, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)
                 ON CONFLICT(user_id) DO UPDATE SET
                    profile_type = COALESCE(excluded.profile_type, profiles.profile_type),
                    stage_name = COALESCE(excluded.stage_name, profiles.stage_name),
                    about_you = COALESCE(excluded.about_you, profiles.about_you),
                    categories = COALESCE(excluded.categories, profiles.categories),
                    tags = COALESCE(excluded.tags, profiles.tags),
                    name = COALESCE(excluded.name, profiles.name),
                    interested_in = COALESCE(excluded.interested_in, profiles.interested_in),
                    organization_type = COALESCE(excluded.organization_type, profiles.organization_type),
                    facebook = COALESCE(excluded.facebook, profiles.facebook),
                    twitter = COALESCE(excluded.twitter, profiles.twitter),
                    linkedin = COALESCE(excluded.linkedin, profiles.linkedin),
                    instagram = COALESCE(excluded.instagram, profiles.instagram),
                    cover_photo = COALESCE(excluded.cover_photo, profiles.cover_photo),
                    profile_photo = COALESCE(excluded.profile_photo, profiles.profile_photo),
                    updated_at = excluded.updated_at",
                params![
                    changes.user_id,
                    profile_type,
                    changes.stage_name,
                    changes.about_you,
                    categories,
                    tags,
                    changes.name,
                    interested_in,
                    changes.organization_type,
                    changes.facebook,
                    changes.twitter,
                    changes.linkedin,
                    changes.instagram,
                    changes.cover_photo,
                    changes.profile_photo,
                    now,
                ],
            )
            .map_err(map_sql_error)?;

            conn.query_row(
                "SELECT id, user_id, profile_type, stage_name, about_you, categories, tags,
                        name, interested_in, organization_type, facebook, twitter, linkedin,
                        instagram, cover_photo, profile_photo, created_at, updated_at
                 FROM profiles WHERE user_id = ?1",
                params![changes.user_id],
                map_profile_row,
            )
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Map a row to a Profile, decoding the JSON array columns
fn map_profile_row(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        user_id: row.get(1)?,
        profile_type: parse_profile_type(row.get(2)?, 2)?,
        stage_name: row.get(3)?,
        about_you: row.get(4)?,
        categories: decode_tags(row.get(5)?, 5)?,
        tags: decode_tags(row.get(6)?, 6)?,
        name: row.get(7)?,
        interested_in: decode_tags(row.get(8)?, 8)?,
        organization_type: row.get(9)?,
        facebook: row.get(10)?,
        twitter: row.get(11)?,
        linkedin: row.get(12)?,
        instagram: row.get(13)?,
        cover_photo: row.get(14)?,
        profile_photo: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

fn parse_profile_type(
    value: Option<String>,
    idx: usize,
) -> rusqlite::Result<Option<ProfileType>> {
    match value {
        None => Ok(None),
        Some(raw) => ProfileType::parse(&raw).map(Some).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                format!("unknown profile type: {raw}").into(),
            )
        }),
    }
}

fn decode_tags(value: Option<String>, idx: usize) -> rusqlite::Result<Vec<String>> {
    match value {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        }),
    }
}

fn encode_tags(value: Option<&Vec<String>>) -> DomainResult<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(|err| InfraError::from(err).into())
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_sql_error(err: rusqlite::Error) -> EncoreError {
    EncoreError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> EncoreError {
    EncoreError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Tests
// =============================================================================
