//! Unit tests for domain entities

pub mod provider_tests;
pub mod sms_log_tests;
