//! Birthday message template entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The birthday greeting template
///
/// At most one row may be active at any time. The storage layer enforces
/// this with a deactivate-others-then-activate transaction backed by a
/// partial unique index - callers must never toggle `is_active` outside
/// that path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayMessage {
    pub id: Uuid,
    pub message: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BirthdayMessage {
    /// Create a new birthday message with a fresh id and timestamps
    pub fn new(message: impl Into<String>, is_active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a birthday message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BirthdayMessageUpdate {
    pub message: Option<String>,
    pub is_active: Option<bool>,
}
