//! Response envelope and error mapping
//!
//! Every endpoint answers with the same envelope:
//! `{"success": bool, "data": ..., "message": ...}` on success, and
//! `{"success": false, "message": ..., "errors": {...}}` on failure, where
//! `errors` carries per-field messages for validation failures.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use encore_domain::EncoreError;
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: T,
    message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload with a human-readable message
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { success: true, data, message: message.into() }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// JSON body extractor whose rejection answers in the error envelope
/// instead of axum's plain-text default.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let body = json!({
                    "success": false,
                    "message": rejection.body_text(),
                });
                Err((rejection.status(), Json(body)).into_response())
            }
        }
    }
}

/// Failed request, convertible from any domain error so handlers can use `?`
#[derive(Debug)]
pub struct ApiFailure(pub EncoreError);

impl From<EncoreError> for ApiFailure {
    fn from(err: EncoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EncoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EncoreError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
        }

        let mut body = json!({
            "success": false,
            "message": self.0.to_string(),
        });
        if let Some(fields) = self.0.field_errors() {
            body["errors"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use encore_domain::FieldErrors;

    use super::*;

    #[test]
    fn validation_failures_map_to_422_with_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("stage_name", "The stage_name field is required.");
        let response = ApiFailure(EncoreError::Validation(errors)).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiFailure(EncoreError::NotFound("profile 9 not found".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn everything_else_maps_to_500() {
        let response = ApiFailure(EncoreError::Database("locked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
