//! Local filesystem implementation of the `FileStore` port
//!
//! References are relative paths of the form `namespace/<uuid>.<ext>`,
//! resolved against the configured root directory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use encore_core::FileStore as FileStorePort;
use encore_domain::{EncoreError, FileUpload, Result as DomainResult};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use crate::errors::InfraError;

/// Disk-backed file store rooted at a configured directory
pub struct LocalFileStore {
    root: Arc<PathBuf>,
}

impl LocalFileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: Arc::new(root.into()) }
    }

    /// Resolve a reference to an absolute path, rejecting traversal.
    fn resolve(&self, reference: &str) -> DomainResult<PathBuf> {
        if reference.split('/').any(|part| part == "..") || reference.starts_with('/') {
            return Err(EncoreError::Storage(format!("invalid file reference: {reference}")));
        }
        Ok(self.root.join(reference))
    }
}

#[async_trait]
impl FileStorePort for LocalFileStore {
    async fn store(&self, upload: &FileUpload, namespace: &str) -> DomainResult<String> {
        let ext = sanitize_extension(upload.extension().as_deref());
        let reference = format!("{namespace}/{}.{ext}", Uuid::new_v4());

        let path = self.resolve(&reference)?;
        let bytes = upload.bytes.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(map_io_error)?;
            }
            std::fs::write(&path, &bytes).map_err(map_io_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)??;

        debug!(reference, size = upload.bytes.len(), "file stored");
        Ok(reference)
    }

    async fn exists(&self, reference: &str) -> DomainResult<bool> {
        let path = self.resolve(reference)?;
        task::spawn_blocking(move || Ok(path.exists())).await.map_err(map_join_error)?
    }

    async fn delete(&self, reference: &str) -> DomainResult<()> {
        let path = self.resolve(reference)?;
        task::spawn_blocking(move || std::fs::remove_file(&path).map_err(map_io_error))
            .await
            .map_err(map_join_error)?
    }
}

/// Keep only simple alphanumeric extensions; anything else falls back to a
/// neutral one.
fn sanitize_extension(ext: Option<&str>) -> String {
    match ext {
        Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_ascii_lowercase()
        }
        _ => "bin".to_string(),
    }
}

fn map_io_error(err: std::io::Error) -> EncoreError {
    EncoreError::from(InfraError::from(err))
}

fn map_join_error(err: task::JoinError) -> EncoreError {
    EncoreError::Internal(format!("Task join error: {err}"))
}
