//! Repository interfaces for persistence operations
//!
//! Traits here define the storage contract the SMS core depends on.
//! Concrete implementations live in the infrastructure layer; in-memory
//! mocks for tests live alongside each trait.

pub mod birthday;
pub mod member;
pub mod provider;
pub mod sms_log;

pub use birthday::{BirthdayRepository, MockBirthdayRepository};
pub use member::{MemberRepository, MockMemberRepository};
pub use provider::{MockProviderRepository, ProviderRepository};
pub use sms_log::{MockSmsLogRepository, SmsLogRepository};
