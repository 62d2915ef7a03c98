//! Business logic services

pub mod reports;
pub mod stats;
pub mod visitors;

use crate::store::VisitorStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
    pub stats: stats::StatsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: VisitorStore) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(store.clone()),
            stats: stats::StatsService::new(store.clone()),
            reports: reports::ReportsService::new(store),
        }
    }
}
