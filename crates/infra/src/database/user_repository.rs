//! User repository implementation using SQLite
//!
//! Users are created by the identity subsystem; this repository resolves
//! them by id and offers a seeding helper for tests and local bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use encore_core::UserRepository as UserRepositoryPort;
use encore_domain::{EncoreError, Result as DomainResult, User};
use rusqlite::params;
use tokio::task;

use super::manager::DbManager;
use crate::errors::InfraError;

/// SQLite-backed implementation of `UserRepository`
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert a user record.
    ///
    /// Identity creation is otherwise out of scope; this exists so tests and
    /// local environments can seed users to attach profiles to.
    pub async fn create(&self, email: &str) -> DomainResult<User> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<User> {
            let conn = db.get_connection()?;
            let created_at = Utc::now().timestamp();

            conn.execute(
                "INSERT INTO users (email, created_at) VALUES (?1, ?2)",
                params![&email, created_at],
            )
            .map_err(map_sql_error)?;

            Ok(User { id: conn.last_insert_rowid(), email, created_at })
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;

            let result = conn.query_row(
                "SELECT id, email, created_at FROM users WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User { id: row.get(0)?, email: row.get(1)?, created_at: row.get(2)? })
                },
            );

            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(err) => Err(map_sql_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_sql_error(err: rusqlite::Error) -> EncoreError {
    EncoreError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> EncoreError {
    EncoreError::Internal(format!("Task join error: {err}"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup_test_db() -> (Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let manager = DbManager::new(db_path, 5).expect("create db manager");
        manager.run_migrations().expect("run migrations");
        (Arc::new(manager), temp_dir)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_and_find_by_id() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        let user = repo.create("nova@example.com").await.expect("create user");
        assert!(user.id > 0);

        let found = repo.find_by_id(user.id).await.expect("find user");
        assert_eq!(found, Some(user));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_find_nonexistent_returns_none() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        let found = repo.find_by_id(424_242).await.expect("query runs");
        assert_eq!(found, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_duplicate_email_rejected() {
        let (db, _temp_dir) = setup_test_db();
        let repo = SqliteUserRepository::new(db);

        repo.create("dup@example.com").await.expect("first insert");
        let err = repo.create("dup@example.com").await.expect_err("second insert fails");
        assert!(matches!(err, EncoreError::Database(_)));
    }
}
