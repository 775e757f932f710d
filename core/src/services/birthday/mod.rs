//! Birthday message engine

mod service;

pub use service::{BirthdayCheckDetails, BirthdayCheckResult, BirthdayService, FailedSend};

#[cfg(test)]
mod tests;
