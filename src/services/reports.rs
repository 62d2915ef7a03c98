//! Report snapshots and exporter contracts
//!
//! CSV quoting, PDF layout, and print orchestration are collaborator
//! concerns; the core only hands out read-only snapshots and the gate pass
//! view model.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{GatePass, Visitor},
    store::VisitorStore,
    view::VisitorFilter,
};

/// Renders a visitor snapshot to CSV text
pub trait CsvExporter {
    fn export(&self, visitors: &[Visitor]) -> AppResult<String>;
}

/// Renders a visitor snapshot to PDF bytes
pub trait PdfExporter {
    fn export(&self, visitors: &[Visitor]) -> AppResult<Vec<u8>>;
}

#[derive(Clone)]
pub struct ReportsService {
    store: VisitorStore,
}

impl ReportsService {
    pub fn new(store: VisitorStore) -> Self {
        Self { store }
    }

    /// A read-only filtered copy of the register for report collaborators
    pub async fn snapshot(&self, filter: &VisitorFilter) -> AppResult<Vec<Visitor>> {
        let visitors = self.store.load_all().await?;
        Ok(filter.apply(&visitors))
    }

    /// Export the filtered register as CSV text via the given collaborator
    pub async fn export_csv<E: CsvExporter>(
        &self,
        exporter: &E,
        filter: &VisitorFilter,
    ) -> AppResult<String> {
        let snapshot = self.non_empty_snapshot(filter).await?;
        exporter.export(&snapshot)
    }

    /// Export the filtered register as PDF bytes via the given collaborator
    pub async fn export_pdf<E: PdfExporter>(
        &self,
        exporter: &E,
        filter: &VisitorFilter,
    ) -> AppResult<Vec<u8>> {
        let snapshot = self.non_empty_snapshot(filter).await?;
        exporter.export(&snapshot)
    }

    /// Build the printable gate pass for one visitor
    pub async fn gate_pass(&self, id: i64) -> AppResult<GatePass> {
        let visitors = self.store.load_all().await?;
        let visitor = visitors
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Visitor with id {} not found", id)))?;
        Ok(GatePass::for_visitor(visitor, Utc::now().date_naive()))
    }

    async fn non_empty_snapshot(&self, filter: &VisitorFilter) -> AppResult<Vec<Visitor>> {
        let snapshot = self.snapshot(filter).await?;
        if snapshot.is_empty() {
            return Err(AppError::Validation("No data to export".to_string()));
        }
        Ok(snapshot)
    }
}
