//! SMS log repository trait defining access to outbound send records

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::sms_log::SmsLog;
use crate::errors::DomainError;

/// Repository for outbound SMS logs
#[async_trait]
pub trait SmsLogRepository: Send + Sync {
    /// Fetch all logs, newest first
    async fn get_logs(&self) -> Result<Vec<SmsLog>, DomainError>;

    /// Persist a new log row for a send attempt
    async fn create_log(&self, log: SmsLog) -> Result<SmsLog, DomainError>;

    /// Overwrite a log's delivery status and stamp the check time
    ///
    /// This is the only mutation allowed after creation; it is driven by
    /// the delivery status checker.
    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<(), DomainError>;
}
