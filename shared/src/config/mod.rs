//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging bootstrap
//! - `schedule` - Recurring job schedules (birthday, delivery status, balance)

pub mod database;
pub mod environment;
pub mod schedule;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use schedule::{JobConfig, SchedulerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Recurring job schedules
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` via dotenvy first so local development picks up the
    /// file without exporting anything.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: Environment::from_env(),
            database: DatabaseConfig::from_env(),
            scheduler: SchedulerConfig::from_env(),
        }
    }
}
