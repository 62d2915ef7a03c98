//! Durable key-value style storage backends

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// One logical key of durable storage holding the serialized register.
///
/// `write` must be all-or-nothing: either the full payload replaces the
/// previous one or the previous payload survives intact.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the stored payload; `None` when nothing was ever written
    async fn read(&self) -> AppResult<Option<String>>;

    /// Atomically replace the stored payload
    async fn write(&self, payload: &str) -> AppResult<()>;
}

/// File-backed storage: the register lives in a single JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Load(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write(&self, payload: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Persist(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        // Write to a sibling temp file, then rename over the target, so a
        // failed write never corrupts the existing register.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload)
            .await
            .map_err(|e| AppError::Persist(format!("cannot write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::Persist(format!("cannot replace {}: {}", self.path.display(), e)))
    }
}
