//! Mock implementation of SmsLogRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::sms_log::SmsLog;
use crate::errors::DomainError;

use super::trait_::SmsLogRepository;

/// Mock SMS log repository for testing
#[derive(Default)]
pub struct MockSmsLogRepository {
    logs: Arc<RwLock<Vec<SmsLog>>>,
}

impl MockSmsLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one log by id, for assertions
    pub async fn get_log(&self, id: Uuid) -> Option<SmsLog> {
        self.logs.read().await.iter().find(|l| l.id == id).cloned()
    }
}

#[async_trait]
impl SmsLogRepository for MockSmsLogRepository {
    async fn get_logs(&self) -> Result<Vec<SmsLog>, DomainError> {
        let mut logs = self.logs.read().await.clone();
        logs.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(logs)
    }

    async fn create_log(&self, log: SmsLog) -> Result<SmsLog, DomainError> {
        self.logs.write().await.push(log.clone());
        Ok(log)
    }

    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<(), DomainError> {
        let mut logs = self.logs.write().await;
        match logs.iter_mut().find(|l| l.id == id) {
            Some(log) => {
                log.delivery_status = Some(status.to_string());
                log.last_checked = Some(Utc::now());
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "SmsLog".to_string(),
            }),
        }
    }
}
