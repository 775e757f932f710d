//! Test doubles for the birthday engine

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::member::Member;
use crate::domain::entities::provider::SmsProvider;
use crate::services::sms_sender::{SmsOutcome, SmsSender};
use crate::services::template;

/// Scripted SMS sender that records every dispatched message
pub struct MockSmsSender {
    fail_with: Option<String>,
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockSmsSender {
    /// Sender where every send succeeds with external id "sent"
    pub fn succeeding() -> Self {
        Self {
            fail_with: None,
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Sender where every send fails with the given error
    pub fn failing(error: &str) -> Self {
        Self {
            fail_with: Some(error.to_string()),
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_sms(
        &self,
        _provider: &SmsProvider,
        recipient: &Member,
        message: &str,
    ) -> SmsOutcome {
        let processed = template::render(message, recipient);
        self.sent
            .write()
            .await
            .push((recipient.phone.clone(), processed.clone()));
        match &self.fail_with {
            Some(error) => SmsOutcome::failed(processed, error.clone()),
            None => SmsOutcome::sent(processed, "sent"),
        }
    }
}
