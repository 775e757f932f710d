//! Error types for the domain layer

use thiserror::Error;

/// Top-level domain error
///
/// Configuration errors (no active provider or template, missing
/// credentials) are raised to the caller; the interactive API layer maps
/// them to 400 responses while scheduled jobs log and swallow them.
/// Transport-level SMS failures never surface here - they are carried as
/// values inside [`crate::services::sms_sender::SmsOutcome`].
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Raised when a send is attempted outside the allowed sending hours.
    /// The message is user-facing and names the next allowed window.
    #[error("{message}")]
    SendingWindowClosed { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sending_window_error_displays_raw_message() {
        let err = DomainError::SendingWindowClosed {
            message: "SMS sending is not allowed before 8:00 AM".to_string(),
        };
        assert_eq!(err.to_string(), "SMS sending is not allowed before 8:00 AM");
    }

    #[test]
    fn configuration_error_is_prefixed() {
        let err = DomainError::Configuration {
            message: "No active SMS provider found".to_string(),
        };
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
