//! # Shepherd Core
//!
//! Core business logic and domain layer for the Shepherd backend.
//! This crate contains domain entities, the SMS and birthday services,
//! repository interfaces, and error types that form the foundation of
//! the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    BirthdayRepository, MemberRepository, ProviderRepository, SmsLogRepository,
};
pub use services::{BirthdayService, SendingWindow, SmsOutcome, SmsSender};
