//! services/engine/src/error.rs
//!
//! Defines the primary error type for the engine service.

use crate::config::ConfigError;
use content_quality_core::ports::PortError;

/// The primary error type for the `engine` service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A scoring or ranking configuration was rejected by the core.
    #[error("Scoring configuration error: {0}")]
    Scoring(#[from] content_quality_core::ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a failed database migration at startup.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents an error building the HTTP client for the content backend.
    #[error("HTTP client Error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
