//! Infrastructure layer for Shepherd
//!
//! Concrete implementations behind the core's abstractions: PostgreSQL
//! repositories, the HTTP SMS transport with its response classifier, the
//! delivery-status and balance services, and the cron-driven scheduler.

pub mod balance;
pub mod database;
pub mod delivery_status;
pub mod scheduler;
pub mod sms;

use thiserror::Error;

pub use shepherd_core::errors::{DomainError, DomainResult};

/// Infrastructure-level error type
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Outbound HTTP call failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Domain rule violation surfaced through an infrastructure path
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure failure
    #[error("{0}")]
    General(String),
}

/// Infrastructure result alias
pub type InfraResult<T> = Result<T, InfrastructureError>;
