//! Route table

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;
use crate::handlers::profiles;

/// Build the application router over the shared context.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/profiles", post(profiles::upsert_profile))
        .route("/profiles/{id}", get(profiles::get_profile))
        .route("/profiles/cover-photo", post(profiles::upload_cover_photo))
        .route("/profiles/profile-photo", post(profiles::upload_profile_photo))
        .with_state(context)
}
