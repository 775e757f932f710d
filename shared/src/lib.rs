//! Shared utilities and common types for the Shepherd server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (database, scheduler, environment)
//! - Logging bootstrap
//! - Utility functions (phone masking, etc.)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JobConfig, SchedulerConfig,
};
pub use utils::phone;
