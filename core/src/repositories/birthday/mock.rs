//! Mock implementation of BirthdayRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::birthday_log::BirthdayLog;
use crate::domain::entities::birthday_message::{BirthdayMessage, BirthdayMessageUpdate};
use crate::errors::DomainError;

use super::trait_::BirthdayRepository;

/// Mock birthday repository for testing
///
/// Enforces the same invariants as the database implementation: at most
/// one active template, and one log per member per calendar date.
#[derive(Default)]
pub struct MockBirthdayRepository {
    messages: Arc<RwLock<Vec<BirthdayMessage>>>,
    logs: Arc<RwLock<Vec<BirthdayLog>>>,
}

impl MockBirthdayRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a template
    pub async fn insert_message(&self, message: BirthdayMessage) {
        self.messages.write().await.push(message);
    }

    /// Number of stored logs, for assertions
    pub async fn log_count(&self) -> usize {
        self.logs.read().await.len()
    }
}

#[async_trait]
impl BirthdayRepository for MockBirthdayRepository {
    async fn get_messages(&self) -> Result<Vec<BirthdayMessage>, DomainError> {
        let mut messages = self.messages.read().await.clone();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn get_active_message(&self) -> Result<Option<BirthdayMessage>, DomainError> {
        let messages = self.messages.read().await;
        Ok(messages.iter().find(|m| m.is_active).cloned())
    }

    async fn create_message(
        &self,
        message: BirthdayMessage,
    ) -> Result<BirthdayMessage, DomainError> {
        let mut messages = self.messages.write().await;
        if message.is_active {
            for m in messages.iter_mut() {
                if m.is_active {
                    m.is_active = false;
                    m.updated_at = Utc::now();
                }
            }
        }
        messages.push(message.clone());
        Ok(message)
    }

    async fn update_message(
        &self,
        id: Uuid,
        update: BirthdayMessageUpdate,
    ) -> Result<BirthdayMessage, DomainError> {
        let mut messages = self.messages.write().await;
        if update.is_active == Some(true) {
            for m in messages.iter_mut() {
                if m.id != id {
                    m.is_active = false;
                }
            }
        }
        match messages.iter_mut().find(|m| m.id == id) {
            Some(message) => {
                if let Some(text) = update.message {
                    message.message = text;
                }
                if let Some(is_active) = update.is_active {
                    message.is_active = is_active;
                }
                message.updated_at = Utc::now();
                Ok(message.clone())
            }
            None => Err(DomainError::NotFound {
                resource: "BirthdayMessage".to_string(),
            }),
        }
    }

    async fn get_logs(&self) -> Result<Vec<BirthdayLog>, DomainError> {
        let mut logs = self.logs.read().await.clone();
        logs.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(logs)
    }

    async fn get_logs_by_date(&self, sent_date: &str) -> Result<Vec<BirthdayLog>, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .filter(|l| l.sent_date == sent_date)
            .cloned()
            .collect())
    }

    async fn create_log(&self, log: BirthdayLog) -> Result<BirthdayLog, DomainError> {
        let mut logs = self.logs.write().await;
        if logs
            .iter()
            .any(|l| l.member_id == log.member_id && l.sent_date == log.sent_date)
        {
            return Err(DomainError::Validation {
                message: format!(
                    "Birthday log already exists for member {} on {}",
                    log.member_id, log.sent_date
                ),
            });
        }
        logs.push(log.clone());
        Ok(log)
    }

    async fn log_exists(&self, member_id: Uuid, sent_date: &str) -> Result<bool, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .any(|l| l.member_id == member_id && l.sent_date == sent_date))
    }
}
