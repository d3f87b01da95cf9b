//! Unified error types for the grid-tui application.

use thiserror::Error;
use uuid::Uuid;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// To-do persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed to-do data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory available for the to-do list")]
    NoDataDirectory,

    #[error("To-do text cannot be empty")]
    EmptyText,

    #[error("To-do item not found: {0}")]
    ItemNotFound(Uuid),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for to-do store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
