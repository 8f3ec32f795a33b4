//! Database access: connection manager and repository implementations

mod manager;
mod profile_repository;
mod user_repository;

pub use manager::DbManager;
pub use profile_repository::SqliteProfileRepository;
pub use user_repository::SqliteUserRepository;
