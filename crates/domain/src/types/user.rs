//! User identity entity
//!
//! Users are owned and created by the identity subsystem; this service only
//! resolves them by id.

use serde::{Deserialize, Serialize};

/// A registered user, owner of at most one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: i64,
}
