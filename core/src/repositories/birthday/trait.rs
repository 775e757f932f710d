//! Birthday repository trait covering message templates and send logs

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::birthday_log::BirthdayLog;
use crate::domain::entities::birthday_message::{BirthdayMessage, BirthdayMessageUpdate};
use crate::errors::DomainError;

/// Repository for birthday message templates and per-member send logs
#[async_trait]
pub trait BirthdayRepository: Send + Sync {
    /// Fetch all birthday message templates, newest first
    async fn get_messages(&self) -> Result<Vec<BirthdayMessage>, DomainError>;

    /// Fetch the single active template, if one exists
    async fn get_active_message(&self) -> Result<Option<BirthdayMessage>, DomainError>;

    /// Persist a new template
    ///
    /// If the new template is active, every existing active template is
    /// deactivated in the same operation, preserving the at-most-one-active
    /// invariant.
    async fn create_message(&self, message: BirthdayMessage) -> Result<BirthdayMessage, DomainError>;

    /// Apply a partial update to a template
    ///
    /// Activating a template deactivates every other template in the same
    /// operation, preserving the at-most-one-active invariant.
    async fn update_message(
        &self,
        id: Uuid,
        update: BirthdayMessageUpdate,
    ) -> Result<BirthdayMessage, DomainError>;

    /// Fetch all birthday send logs, newest first
    async fn get_logs(&self) -> Result<Vec<BirthdayLog>, DomainError>;

    /// Fetch birthday send logs for one calendar date (YYYY-MM-DD)
    async fn get_logs_by_date(&self, sent_date: &str) -> Result<Vec<BirthdayLog>, DomainError>;

    /// Persist a birthday send log
    ///
    /// The (member, sent_date) pair is unique; a second log for the same
    /// member on the same date must fail with a validation error.
    async fn create_log(&self, log: BirthdayLog) -> Result<BirthdayLog, DomainError>;

    /// Check whether a member already has a log for the given date
    async fn log_exists(&self, member_id: Uuid, sent_date: &str) -> Result<bool, DomainError>;
}
