//! Application bootstrap
//!
//! The one-time startup pass: configuration, tracing, store and service
//! wiring, and the stale-visitor reconciliation that runs before the first
//! render.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    services::Services,
    store::{FileBackend, VisitorStore},
    AppState,
};

/// Build the application state: load configuration, initialize tracing,
/// wire the file-backed store, and run the startup auto-check-out pass.
pub async fn bootstrap() -> anyhow::Result<AppState> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config);

    tracing::info!("Starting Gatehouse v{}", env!("CARGO_PKG_VERSION"));

    let backend = FileBackend::new(&config.storage.path);
    let store = VisitorStore::new(Arc::new(backend));
    let services = Services::new(store);

    // Visitors left active on a previous day are closed out before anything
    // is displayed. An unreadable register downgrades to a warning here so
    // the front desk can still open with an empty table.
    match services.visitors.auto_check_out_stale().await {
        Ok(0) => {}
        Ok(count) => tracing::info!(count, "closed out visitors from previous days"),
        Err(e) => tracing::warn!("startup reconciliation skipped: {}", e),
    }

    Ok(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

/// Output shape of the fmt layer, from `logging.format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    fn parse(format: &str) -> Self {
        match format {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            // "pretty" and anything unrecognized
            _ => LogFormat::Pretty,
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gatehouse={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    // try_init: the embedding shell (or a test harness) may already have a
    // subscriber installed
    let _ = match LogFormat::parse(&config.logging.format) {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };
}
