//! Application context - dependency wiring
//!
//! Builds the infra backends from configuration and wires them into the
//! core services. Handlers receive the context as shared axum state.

use std::sync::Arc;

use encore_core::{FileStore, PhotoService, ProfileRepository, ProfileService, UserRepository};
use encore_domain::{Config, Result};
use encore_infra::{DbManager, LocalFileStore, SqliteProfileRepository, SqliteUserRepository};
use tracing::info;

/// Shared application state
pub struct AppContext {
    /// Effective configuration the context was built from
    pub config: Config,
    /// Database manager, exposed for health checks
    pub db: Arc<DbManager>,
    /// Concrete user repository, exposed for seeding
    pub users: Arc<SqliteUserRepository>,
    /// Profile upsert and retrieval service
    pub profile_service: ProfileService,
    /// Photo replacement service
    pub photo_service: PhotoService,
}

impl AppContext {
    /// Build the context: open the database, run migrations, and wire the
    /// services to their SQLite and filesystem backends.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let users = Arc::new(SqliteUserRepository::new(Arc::clone(&db)));
        let profiles = Arc::new(SqliteProfileRepository::new(Arc::clone(&db)));
        let files = Arc::new(LocalFileStore::new(&config.storage.root));

        let users_port: Arc<dyn UserRepository> = Arc::clone(&users) as Arc<dyn UserRepository>;
        let profiles_port: Arc<dyn ProfileRepository> =
            Arc::clone(&profiles) as Arc<dyn ProfileRepository>;
        let files_port: Arc<dyn FileStore> = files;

        let profile_service =
            ProfileService::new(Arc::clone(&users_port), Arc::clone(&profiles_port));
        let photo_service = PhotoService::new(users_port, profiles_port, files_port);

        info!(
            db_path = %config.database.path,
            storage_root = %config.storage.root,
            "application context initialised"
        );

        Ok(Self { config, db, users, profile_service, photo_service })
    }

    /// Verify database connectivity.
    ///
    /// # Errors
    /// Returns an error if the database does not answer.
    pub fn health_check(&self) -> Result<()> {
        self.db.health_check()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.database.path = temp_dir.path().join("test.db").to_string_lossy().into_owned();
        config.storage.root = temp_dir.path().join("storage").to_string_lossy().into_owned();
        config
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_context_builds_and_is_healthy() {
        let temp_dir = TempDir::new().expect("temp dir");
        let context = AppContext::new(test_config(&temp_dir)).expect("context");

        context.health_check().expect("healthy");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_services_share_one_database() {
        let temp_dir = TempDir::new().expect("temp dir");
        let context = AppContext::new(test_config(&temp_dir)).expect("context");

        let user = context.users.create("wired@example.com").await.expect("seed user");
        let err = context.profile_service.get_profile(user.id).await.expect_err("no profile yet");
        assert!(matches!(err, encore_domain::EncoreError::NotFound(_)));
    }
}
