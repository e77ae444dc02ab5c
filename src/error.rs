use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a whole run. Per-file problems are recorded as
/// [`crate::agents::Diagnostic`]s instead and never surface here.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Discovery root not found or not a directory: {0}")]
    RootNotFound(PathBuf),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Validation failed with {errors} error(s) and {warnings} warning(s)")]
    ValidationFailed { errors: usize, warnings: usize },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
