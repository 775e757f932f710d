//! Domain entities
//!
//! Plain data records backed by the relational schema. Construction helpers
//! stamp ids and timestamps; behaviour methods capture the small pieces of
//! logic the SMS core needs (first-name extraction, birthday matching,
//! pending-status checks).

pub mod birthday_log;
pub mod birthday_message;
pub mod member;
pub mod provider;
pub mod sms_log;
pub mod template;

pub use birthday_log::BirthdayLog;
pub use birthday_message::BirthdayMessage;
pub use member::Member;
pub use provider::{AuthMethod, RequestMethod, SmsProvider};
pub use sms_log::SmsLog;
pub use template::SmsTemplate;

#[cfg(test)]
mod tests;
