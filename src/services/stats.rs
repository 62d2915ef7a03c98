//! Register statistics (dashboard counters)

use chrono::Utc;
use serde::Serialize;

use crate::{error::AppResult, models::Visitor, store::VisitorStore};

/// The three counters shown above the visitor table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisitorStats {
    /// All records in the register
    pub total: usize,
    /// Records whose visit day is today
    pub today: usize,
    /// Visitors currently on-site
    pub active: usize,
}

#[derive(Clone)]
pub struct StatsService {
    store: VisitorStore,
}

impl StatsService {
    pub fn new(store: VisitorStore) -> Self {
        Self { store }
    }

    /// Compute the counters from the persisted register
    pub async fn summary(&self) -> AppResult<VisitorStats> {
        let visitors = self.store.load_all().await?;
        Ok(Self::of(&visitors))
    }

    /// Compute the counters from an already-loaded collection
    pub fn of(visitors: &[Visitor]) -> VisitorStats {
        let today = Utc::now().date_naive();
        VisitorStats {
            total: visitors.len(),
            today: visitors.iter().filter(|v| v.date == today).count(),
            active: visitors.iter().filter(|v| v.is_active()).count(),
        }
    }
}
