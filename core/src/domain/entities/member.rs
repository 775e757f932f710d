//! Church member entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status value for members who participate in messaging
pub const MEMBER_STATUS_ACTIVE: &str = "Active";

/// A registered church member
///
/// Phone numbers and birthdays are stored as loosely formatted text; the
/// birthday may be a full `YYYY-MM-DD` date or a bare `MM-DD`. The member
/// CRUD surface owns writes - the SMS core only reads these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub department: String,
    pub birthday: Option<String>,
    pub status: String,
}

impl Member {
    /// Whether the member participates in attendance and messaging
    pub fn is_active(&self) -> bool {
        self.status == MEMBER_STATUS_ACTIVE
    }

    /// First whitespace-delimited token of the member's name
    ///
    /// Personalized messages address members by first name only.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Month-day portion of the birthday, if one is recorded
    ///
    /// Handles both stored forms: `YYYY-MM-DD` yields its last two
    /// segments, a bare `MM-DD` is returned as-is.
    pub fn birthday_month_day(&self) -> Option<String> {
        let birthday = self.birthday.as_deref()?.trim();
        if birthday.is_empty() {
            return None;
        }

        let parts: Vec<&str> = birthday.split('-').collect();
        if parts.len() == 3 {
            Some(format!("{}-{}", parts[1], parts[2]))
        } else {
            Some(birthday.to_string())
        }
    }

    /// Whether the member has a birthday on the given `MM-DD` day
    pub fn has_birthday_on(&self, month_day: &str) -> bool {
        self.birthday_month_day()
            .map(|md| md == month_day)
            .unwrap_or(false)
    }
}
