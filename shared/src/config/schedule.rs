//! Recurring job schedule configuration
//!
//! Each of the three maintenance jobs (birthday check, delivery status poll,
//! balance refresh) owns a cron expression and an enable flag, independently
//! overridable through environment variables. Expressions use the six-field
//! form of the `cron` crate (seconds first).

use serde::{Deserialize, Serialize};

/// Default schedule for the birthday check job: daily at 08:00
pub const DEFAULT_BIRTHDAY_SCHEDULE: &str = "0 0 8 * * *";

/// Default schedule for the delivery status poll: every 30 minutes
pub const DEFAULT_DELIVERY_STATUS_SCHEDULE: &str = "0 */30 * * * *";

/// Default schedule for the balance refresh: every 6 hours
pub const DEFAULT_BALANCE_SCHEDULE: &str = "0 0 */6 * * *";

/// Configuration for a single recurring job
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobConfig {
    /// Cron expression (six fields, seconds first)
    pub schedule: String,

    /// Whether the job runs at all
    pub enabled: bool,
}

impl JobConfig {
    /// Create a job configuration with the given schedule, enabled
    pub fn new(schedule: impl Into<String>) -> Self {
        Self {
            schedule: schedule.into(),
            enabled: true,
        }
    }

    /// Read a job configuration from `<prefix>_CRON_SCHEDULE` and
    /// `<prefix>_CRON_ENABLED`
    ///
    /// The job is enabled unless the flag is set to the literal string
    /// `"false"`, matching the behaviour users expect from a kill switch.
    fn from_env(prefix: &str, default_schedule: &str) -> Self {
        let schedule = std::env::var(format!("{prefix}_CRON_SCHEDULE"))
            .unwrap_or_else(|_| default_schedule.to_string());
        let enabled = std::env::var(format!("{prefix}_CRON_ENABLED"))
            .map(|v| v != "false")
            .unwrap_or(true);

        Self { schedule, enabled }
    }
}

/// Schedules for the three recurring maintenance jobs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Daily birthday message check
    pub birthday: JobConfig,

    /// Delivery status poll for pending SMS logs
    pub delivery_status: JobConfig,

    /// Provider balance refresh
    pub balance: JobConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            birthday: JobConfig::new(DEFAULT_BIRTHDAY_SCHEDULE),
            delivery_status: JobConfig::new(DEFAULT_DELIVERY_STATUS_SCHEDULE),
            balance: JobConfig::new(DEFAULT_BALANCE_SCHEDULE),
        }
    }
}

impl SchedulerConfig {
    /// Read all job configurations from environment variables
    ///
    /// Recognized variables: `BIRTHDAY_CRON_SCHEDULE`, `BIRTHDAY_CRON_ENABLED`,
    /// `DELIVERY_STATUS_CRON_SCHEDULE`, `DELIVERY_STATUS_CRON_ENABLED`,
    /// `BALANCE_FETCH_CRON_SCHEDULE`, `BALANCE_FETCH_CRON_ENABLED`.
    pub fn from_env() -> Self {
        Self {
            birthday: JobConfig::from_env("BIRTHDAY", DEFAULT_BIRTHDAY_SCHEDULE),
            delivery_status: JobConfig::from_env(
                "DELIVERY_STATUS",
                DEFAULT_DELIVERY_STATUS_SCHEDULE,
            ),
            balance: JobConfig::from_env("BALANCE_FETCH", DEFAULT_BALANCE_SCHEDULE),
        }
    }
}
