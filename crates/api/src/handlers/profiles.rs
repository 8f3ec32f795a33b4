//! Profile endpoints
//!
//! Upsert and retrieval take JSON bodies; the photo endpoints take
//! multipart forms with a `user_id` text part and one file part named
//! after the photo field they replace.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use encore_core::profile::validation;
use encore_domain::{
    EncoreError, FieldErrors, FileUpload, PhotoField, Profile, ProfileUpsertRequest,
};

use crate::context::AppContext;
use crate::response::{ApiFailure, ApiJson, ApiResponse};

/// `GET /profiles/{id}` - fetch a profile by its id
pub async fn get_profile(
    State(context): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Profile>, ApiFailure> {
    let profile = context.profile_service.get_profile(id).await?;
    Ok(ApiResponse::ok(profile, "Get profile details."))
}

/// `POST /profiles` - create or update the caller's profile
pub async fn upsert_profile(
    State(context): State<Arc<AppContext>>,
    ApiJson(request): ApiJson<ProfileUpsertRequest>,
) -> Result<ApiResponse<Profile>, ApiFailure> {
    let profile = context.profile_service.upsert_profile(&request).await?;
    Ok(ApiResponse::ok(profile, "Profile saved successfully."))
}

/// `POST /profiles/cover-photo` - replace the cover photo
pub async fn upload_cover_photo(
    State(context): State<Arc<AppContext>>,
    multipart: Multipart,
) -> Result<ApiResponse<Profile>, ApiFailure> {
    replace_photo(&context, multipart, PhotoField::CoverPhoto).await
}

/// `POST /profiles/profile-photo` - replace the profile photo
pub async fn upload_profile_photo(
    State(context): State<Arc<AppContext>>,
    multipart: Multipart,
) -> Result<ApiResponse<Profile>, ApiFailure> {
    replace_photo(&context, multipart, PhotoField::ProfilePhoto).await
}

async fn replace_photo(
    context: &AppContext,
    multipart: Multipart,
    field: PhotoField,
) -> Result<ApiResponse<Profile>, ApiFailure> {
    let (user_id, upload) = read_photo_form(multipart, field).await?;
    let profile = context.photo_service.replace_photo(user_id, &upload, field).await?;

    let message = match field {
        PhotoField::CoverPhoto => "The cover photo saved successfully.",
        PhotoField::ProfilePhoto => "The profile photo saved successfully.",
    };
    Ok(ApiResponse::ok(profile, message))
}

/// Pull `user_id` and the photo file out of the multipart form.
///
/// Missing or unparsable parts surface as field errors alongside the file
/// checks, so one response reports everything that is wrong with the form.
async fn read_photo_form(
    mut multipart: Multipart,
    field: PhotoField,
) -> Result<(i64, FileUpload), ApiFailure> {
    let mut user_id_raw: Option<String> = None;
    let mut upload: Option<FileUpload> = None;

    while let Some(part) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = part.name().map(ToString::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let text = part.text().await.map_err(map_multipart_error)?;
                user_id_raw = Some(text);
            }
            Some(name) if name == field.field_name() => {
                let file_name =
                    part.file_name().map_or_else(|| "upload".to_string(), ToString::to_string);
                let content_type = part.content_type().map(ToString::to_string);
                let bytes = part.bytes().await.map_err(map_multipart_error)?.to_vec();
                upload = Some(FileUpload { file_name, content_type, bytes });
            }
            _ => {}
        }
    }

    let mut errors = FieldErrors::new();
    let user_id = match user_id_raw.as_deref() {
        None => {
            errors.add("user_id", validation::required_message("user_id"));
            None
        }
        Some(text) => match text.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add("user_id", "The user_id field must be an integer.");
                None
            }
        },
    };
    if let Err(upload_errors) = validation::validate_photo_upload(upload.as_ref(), field) {
        for (name, messages) in upload_errors.iter() {
            for message in messages {
                errors.add(name.clone(), message.clone());
            }
        }
    }
    if !errors.is_empty() {
        return Err(EncoreError::Validation(errors).into());
    }

    match (user_id, upload) {
        (Some(user_id), Some(upload)) => Ok((user_id, upload)),
        // Both were just checked; this arm is unreachable.
        _ => Err(EncoreError::Internal("photo form lost after validation".to_string()).into()),
    }
}

fn map_multipart_error(err: axum::extract::multipart::MultipartError) -> ApiFailure {
    EncoreError::Internal(format!("failed to read multipart body: {err}")).into()
}
