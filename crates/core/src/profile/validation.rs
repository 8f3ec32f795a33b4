//! Request validation for profile upserts and photo uploads
//!
//! Two rule sets keyed by the `type` discriminator: `PERFORMER` selects the
//! performer schema, anything else the audience schema. Validation runs
//! before any lookup or write; a failure carries per-field messages and
//! causes no mutation.

use encore_domain::{
    AudienceInput, FieldErrors, FileUpload, PerformerInput, PhotoField, ProfileInput,
    ProfileUpsertRequest, SocialLinks,
};

/// Discriminator value selecting the performer rule set
pub const PERFORMER_TYPE: &str = "PERFORMER";

/// Image extensions accepted for photo uploads
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// MIME types accepted for photo uploads
pub const ALLOWED_IMAGE_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Standard message for a missing required field
pub fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

fn non_empty_message(field: &str) -> String {
    format!("The {field} field must not be empty.")
}

fn image_type_message(field: &str) -> String {
    format!("The {field} must be a file of type: jpeg, jpg, png.")
}

/// Validate a raw upsert request against the variant-specific schema.
///
/// Returns the validated sum-type input, or the full set of field errors.
pub fn validate_upsert(
    request: &ProfileUpsertRequest,
) -> std::result::Result<ProfileInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let user_id = request.user_id;
    if user_id.is_none() {
        errors.add("user_id", required_message("user_id"));
    }
    if request.profile_type.as_deref().map_or(true, str::is_empty) {
        errors.add("type", required_message("type"));
    }

    let is_performer = request.profile_type.as_deref() == Some(PERFORMER_TYPE);
    if is_performer {
        check_required_string(&mut errors, "stage_name", request.stage_name.as_deref());
        check_required_string(&mut errors, "about_you", request.about_you.as_deref());
        check_required_array(&mut errors, "categories", request.categories.as_deref());
        check_required_array(&mut errors, "tags", request.tags.as_deref());
    } else {
        check_required_string(&mut errors, "name", request.name.as_deref());
        check_required_array(&mut errors, "interested_in", request.interested_in.as_deref());
        check_required_string(
            &mut errors,
            "organization_type",
            request.organization_type.as_deref(),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let social = SocialLinks {
        facebook: request.facebook.clone(),
        twitter: request.twitter.clone(),
        linkedin: request.linkedin.clone(),
        instagram: request.instagram.clone(),
    };

    // Every required field was checked above; the defaults are unreachable.
    let user_id = user_id.unwrap_or_default();

    let input = if is_performer {
        ProfileInput::Performer(PerformerInput {
            user_id,
            stage_name: request.stage_name.clone().unwrap_or_default(),
            about_you: request.about_you.clone().unwrap_or_default(),
            categories: request.categories.clone().unwrap_or_default(),
            tags: request.tags.clone().unwrap_or_default(),
            social,
        })
    } else {
        ProfileInput::Audience(AudienceInput {
            user_id,
            name: request.name.clone().unwrap_or_default(),
            interested_in: request.interested_in.clone().unwrap_or_default(),
            organization_type: request.organization_type.clone().unwrap_or_default(),
            social,
        })
    };

    Ok(input)
}

/// Validate a photo upload: file present and of an allowed image type.
pub fn validate_photo_upload(
    upload: Option<&FileUpload>,
    field: PhotoField,
) -> std::result::Result<(), FieldErrors> {
    let name = field.field_name();
    let mut errors = FieldErrors::new();

    match upload {
        None => errors.add(name, required_message(name)),
        Some(upload) if !is_allowed_image(upload) => {
            errors.add(name, image_type_message(name));
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_allowed_image(upload: &FileUpload) -> bool {
    if let Some(ext) = upload.extension() {
        if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
    }
    upload
        .content_type
        .as_deref()
        .is_some_and(|mime| ALLOWED_IMAGE_MIME_TYPES.contains(&mime))
}

fn check_required_string(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.add(field, required_message(field));
    }
}

fn check_required_array(errors: &mut FieldErrors, field: &str, value: Option<&[String]>) {
    match value {
        None => errors.add(field, required_message(field)),
        Some([]) => errors.add(field, non_empty_message(field)),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performer_request() -> ProfileUpsertRequest {
        ProfileUpsertRequest {
            user_id: Some(7),
            profile_type: Some("PERFORMER".into()),
            stage_name: Some("Nova".into()),
            about_you: Some("x".into()),
            categories: Some(vec!["music".into()]),
            tags: Some(vec!["live".into()]),
            ..ProfileUpsertRequest::default()
        }
    }

    fn audience_request() -> ProfileUpsertRequest {
        ProfileUpsertRequest {
            user_id: Some(7),
            profile_type: Some("AUDIENCE".into()),
            name: Some("A".into()),
            interested_in: Some(vec!["jazz".into()]),
            organization_type: Some("indie".into()),
            ..ProfileUpsertRequest::default()
        }
    }

    #[test]
    fn valid_performer_request_passes() {
        let input = validate_upsert(&performer_request()).unwrap();
        match input {
            ProfileInput::Performer(performer) => {
                assert_eq!(performer.stage_name, "Nova");
                assert_eq!(performer.categories, vec!["music".to_string()]);
            }
            ProfileInput::Audience(_) => panic!("expected performer input"),
        }
    }

    #[test]
    fn valid_audience_request_passes() {
        let input = validate_upsert(&audience_request()).unwrap();
        assert!(matches!(input, ProfileInput::Audience(_)));
    }

    #[test]
    fn missing_stage_name_names_the_field() {
        let mut request = performer_request();
        request.stage_name = None;

        let errors = validate_upsert(&request).unwrap_err();
        assert_eq!(errors.get("stage_name"), Some(&["The stage_name field is required.".into()][..]));
        assert_eq!(errors.get("about_you"), None);
    }

    #[test]
    fn empty_categories_array_is_rejected() {
        let mut request = performer_request();
        request.categories = Some(Vec::new());

        let errors = validate_upsert(&request).unwrap_err();
        assert_eq!(errors.get("categories"), Some(&["The categories field must not be empty.".into()][..]));
    }

    #[test]
    fn unknown_type_uses_audience_rules() {
        let mut request = audience_request();
        request.profile_type = Some("SOMETHING_ELSE".into());
        assert!(matches!(validate_upsert(&request), Ok(ProfileInput::Audience(_))));
    }

    #[test]
    fn missing_user_id_and_type_both_reported() {
        let request = ProfileUpsertRequest::default();
        let errors = validate_upsert(&request).unwrap_err();
        assert!(errors.get("user_id").is_some());
        assert!(errors.get("type").is_some());
        // No type means audience rules apply
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn performer_fields_not_required_for_audience() {
        let errors_free = validate_upsert(&audience_request());
        assert!(errors_free.is_ok());
    }

    fn png_upload() -> FileUpload {
        FileUpload {
            file_name: "cover.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![0u8; 4],
        }
    }

    #[test]
    fn photo_upload_accepts_allowed_extensions() {
        for name in ["a.png", "b.jpg", "c.jpeg", "d.PNG"] {
            let upload = FileUpload { file_name: name.into(), content_type: None, bytes: vec![1] };
            assert!(
                validate_photo_upload(Some(&upload), PhotoField::CoverPhoto).is_ok(),
                "{name} should be accepted"
            );
        }
    }

    #[test]
    fn photo_upload_falls_back_to_content_type() {
        let upload = FileUpload {
            file_name: "upload".into(),
            content_type: Some("image/jpeg".into()),
            bytes: vec![1],
        };
        assert!(validate_photo_upload(Some(&upload), PhotoField::ProfilePhoto).is_ok());
    }

    #[test]
    fn photo_upload_rejects_other_types() {
        let upload = FileUpload {
            file_name: "notes.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: vec![1],
        };
        let errors = validate_photo_upload(Some(&upload), PhotoField::CoverPhoto).unwrap_err();
        assert_eq!(
            errors.get("cover_photo"),
            Some(&["The cover_photo must be a file of type: jpeg, jpg, png.".into()][..])
        );
    }

    #[test]
    fn photo_upload_requires_a_file() {
        let errors = validate_photo_upload(None, PhotoField::ProfilePhoto).unwrap_err();
        assert!(errors.get("profile_photo").is_some());
    }

    #[test]
    fn valid_png_upload_passes() {
        assert!(validate_photo_upload(Some(&png_upload()), PhotoField::CoverPhoto).is_ok());
    }
}
