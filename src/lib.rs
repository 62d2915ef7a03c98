//! Gatehouse - Visitor Check-In Register
//!
//! Core of a single-site visitor register: front-desk tooling captures a
//! visitor's photo, contact details, and visit purpose; this crate owns the
//! record lifecycle (register, edit, check-out, delete, startup
//! reconciliation), the persisted collection, and the filtered/paginated
//! projections handed to the rendering and report collaborators.

use std::sync::Arc;

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared with the embedding UI shell
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
