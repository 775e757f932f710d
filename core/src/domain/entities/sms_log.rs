//! Outbound SMS log entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log status for a successful hand-off to the provider
pub const SMS_STATUS_SENT: &str = "Sent";
/// Log status for a send the provider rejected
pub const SMS_STATUS_FAILED: &str = "Failed";
/// Initial delivery status recorded for accepted messages
pub const DELIVERY_STATUS_PENDING: &str = "Pending";

/// One row per outbound SMS attempt
///
/// Recipient name and phone are denormalized snapshots, not live joins -
/// the log must stay meaningful after the member record changes. After
/// creation only `delivery_status` and `last_checked` are mutated, by the
/// delivery status checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsLog {
    pub id: Uuid,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub message: String,
    pub provider_id: Uuid,
    pub status: String,
    pub sent_at: DateTime<Utc>,
    pub delivery_status: Option<String>,
    pub message_id: Option<String>,
    pub last_checked: Option<DateTime<Utc>>,
}

impl SmsLog {
    /// Create a log row for a send attempt
    ///
    /// Accepted messages start with a `Pending` delivery status and the
    /// provider-assigned message id so the status poller can pick them up;
    /// failed attempts carry neither.
    pub fn new(
        recipient_name: impl Into<String>,
        recipient_phone: impl Into<String>,
        message: impl Into<String>,
        provider_id: Uuid,
        success: bool,
        message_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_name: recipient_name.into(),
            recipient_phone: recipient_phone.into(),
            message: message.into(),
            provider_id,
            status: if success { SMS_STATUS_SENT } else { SMS_STATUS_FAILED }.to_string(),
            sent_at: Utc::now(),
            delivery_status: success.then(|| DELIVERY_STATUS_PENDING.to_string()),
            message_id: if success { message_id } else { None },
            last_checked: None,
        }
    }

    /// Whether the delivery status poller should still check this log
    ///
    /// Some code paths store composite strings like `"Pending - reason"`,
    /// so both the bare and prefixed forms count as pending.
    pub fn is_pending(&self) -> bool {
        self.message_id.is_some()
            && self
                .delivery_status
                .as_deref()
                .map(|s| s.contains(DELIVERY_STATUS_PENDING))
                .unwrap_or(false)
    }
}
