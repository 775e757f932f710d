//! Outbound SMS sending abstraction
//!
//! The transport lives in the infrastructure layer; the core only depends
//! on this trait and its self-contained outcome type.

use async_trait::async_trait;

use crate::domain::entities::member::Member;
use crate::domain::entities::provider::SmsProvider;

/// Result of a single send attempt.
///
/// Transport problems are folded into `success = false` with an `error`
/// string; the sender never surfaces an `Err` past this boundary. The
/// rendered message is echoed back so callers can log it even when the
/// send failed before reaching the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsOutcome {
    pub success: bool,
    pub processed_message: String,
    pub error: Option<String>,
    pub external_id: Option<String>,
}

impl SmsOutcome {
    /// Successful send with a provider-assigned message id
    pub fn sent(processed_message: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            success: true,
            processed_message: processed_message.into(),
            error: None,
            external_id: Some(external_id.into()),
        }
    }

    /// Failed send carrying a user-presentable error
    pub fn failed(processed_message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            processed_message: processed_message.into(),
            error: Some(error.into()),
            external_id: None,
        }
    }
}

/// Sends one SMS through a configured provider.
///
/// Implementations render recipient placeholders into the message before
/// dispatch, so callers may pass either a raw template or final text.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(
        &self,
        provider: &SmsProvider,
        recipient: &Member,
        message: &str,
    ) -> SmsOutcome;
}
