//! SMS template entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::member::Member;
use crate::services::template;

/// A reusable SMS message template
///
/// `category` is `Present` or `Absent` (attendance follow-ups). Templates
/// are read-only to the SMS core; the content is a placeholder string
/// rendered against a member record before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsTemplate {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl SmsTemplate {
    /// Render this template's content for a member
    pub fn render_for(&self, member: &Member) -> String {
        template::render(&self.content, member)
    }
}
