//! Birthday send log entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (member, calendar day) birthday send attempt
///
/// Uniqueness on `(member_id, sent_date)` is the idempotency guarantee
/// that keeps retried or overlapping birthday runs from double-sending.
/// A failed send still produces a row: birthday messages are fire-once
/// per day, not retried until success. Rows are never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayLog {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub member_phone: String,
    pub message: String,
    /// Local calendar day of the attempt, `YYYY-MM-DD`
    pub sent_date: String,
    pub sent_at: DateTime<Utc>,
    pub status: String,
    pub provider_id: Uuid,
}

impl BirthdayLog {
    /// Create a log row for a birthday send attempt
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        member_id: Uuid,
        member_name: impl Into<String>,
        member_phone: impl Into<String>,
        message: impl Into<String>,
        sent_date: impl Into<String>,
        status: impl Into<String>,
        provider_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            member_name: member_name.into(),
            member_phone: member_phone.into(),
            message: message.into(),
            sent_date: sent_date.into(),
            sent_at: Utc::now(),
            status: status.into(),
            provider_id,
        }
    }
}
