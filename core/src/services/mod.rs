//! Business logic services for the SMS delivery core

pub mod birthday;
pub mod sending_window;
pub mod sms_sender;
pub mod template;

pub use birthday::{BirthdayCheckDetails, BirthdayCheckResult, BirthdayService, FailedSend};
pub use sending_window::SendingWindow;
pub use sms_sender::{SmsOutcome, SmsSender};
