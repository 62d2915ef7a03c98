//! Record store: sole authority over the canonical visitor collection

pub mod backend;

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::Visitor;

pub use backend::{FileBackend, StorageBackend};

/// Owns the canonical ordered collection of visitor records. All mutations
/// funnel through it and every mutating operation reloads from the backend
/// first rather than trusting any in-memory copy, so it never acts on stale
/// state. That read-modify-write is safe for the intended single-process use
/// but not against concurrent processes sharing the same file.
#[derive(Clone)]
pub struct VisitorStore {
    backend: Arc<dyn StorageBackend>,
}

impl VisitorStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load the full persisted collection in canonical order (newest first).
    /// Missing storage means an empty register; unparseable storage is a
    /// `Load` error.
    pub async fn load_all(&self) -> AppResult<Vec<Visitor>> {
        let Some(payload) = self.backend.read().await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&payload)
            .map_err(|e| AppError::Load(format!("corrupt visitor data: {}", e)))
    }

    /// Read-path variant of [`load_all`](Self::load_all): a load failure is
    /// logged and recovered as an empty register, never fatal.
    pub async fn load_or_default(&self) -> Vec<Visitor> {
        match self.load_all().await {
            Ok(visitors) => visitors,
            Err(e) => {
                tracing::warn!("recovering from unreadable register: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrite durable storage with the given collection in one write
    pub async fn persist(&self, visitors: &[Visitor]) -> AppResult<()> {
        let payload = serde_json::to_string(visitors)
            .map_err(|e| AppError::Persist(format!("cannot serialize visitor data: {}", e)))?;
        self.backend.write(&payload).await
    }

    /// Prepend a new record and persist
    pub async fn insert_front(&self, visitor: Visitor) -> AppResult<()> {
        let mut visitors = self.load_all().await?;
        visitors.insert(0, visitor);
        self.persist(&visitors).await
    }

    /// Load, apply `updater` to the record with the given id, persist, and
    /// return the updated record. No write happens when the id is absent or
    /// the updater rejects the change.
    pub async fn mutate<F>(&self, id: i64, updater: F) -> AppResult<Visitor>
    where
        F: FnOnce(&mut Visitor) -> AppResult<()>,
    {
        let mut visitors = self.load_all().await?;
        let visitor = visitors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))?;

        updater(visitor)?;
        let updated = visitor.clone();
        self.persist(&visitors).await?;
        Ok(updated)
    }

    /// Remove the record with the given id and persist, returning the
    /// removed record. Absence is reported as `NotFound`, with no write.
    pub async fn remove(&self, id: i64) -> AppResult<Visitor> {
        let mut visitors = self.load_all().await?;
        let index = visitors
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))?;

        let removed = visitors.remove(index);
        self.persist(&visitors).await?;
        Ok(removed)
    }
}
