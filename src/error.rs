//! Error types for the Gatehouse register

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Stored visitor data could not be read or parsed. Read paths recover
    /// by treating the register as empty; mutating operations propagate it.
    #[error("Failed to load visitor data: {0}")]
    Load(String),

    /// The register could not be written back. Always propagated so the
    /// caller can surface it; the store never leaves a partial write behind.
    #[error("Failed to save visitor data: {0}")]
    Persist(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {}", field))
                })
            })
            .collect();
        AppError::Validation(details.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
