//! Time-of-day gate for outbound SMS
//!
//! Messages may only go out between 08:00 and 20:00 Lagos time. The same
//! gate guards the interactive send path and the birthday engine, so a
//! scheduler misfire at night cannot wake anyone up.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::errors::DomainError;

/// Lagos is UTC+1 year-round; Nigeria does not observe DST.
const LAGOS_UTC_OFFSET_SECS: i32 = 3600;

/// Inclusive start hour of the allowed window (Lagos local time)
pub const WINDOW_START_HOUR: u32 = 8;

/// Exclusive end hour of the allowed window (Lagos local time)
pub const WINDOW_END_HOUR: u32 = 20;

/// The 08:00-20:00 Lagos-time interval during which sends are allowed
#[derive(Debug, Clone, Copy)]
pub struct SendingWindow {
    start_hour: u32,
    end_hour: u32,
}

impl Default for SendingWindow {
    fn default() -> Self {
        Self {
            start_hour: WINDOW_START_HOUR,
            end_hour: WINDOW_END_HOUR,
        }
    }
}

impl SendingWindow {
    /// Window with the standard 08:00-20:00 bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the window against the current wall clock
    pub fn check_now(&self) -> Result<(), DomainError> {
        self.check(Utc::now())
    }

    /// Check the window against an explicit instant
    ///
    /// Returns `SendingWindowClosed` with a user-facing message naming the
    /// current Lagos time and when sending resumes.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let lagos = self.lagos_time(now);
        let hour = lagos.hour();
        let minute = lagos.minute();

        if hour < self.start_hour {
            return Err(DomainError::SendingWindowClosed {
                message: format!(
                    "SMS sending is not allowed before 8:00 AM (current time: {}:{:02}). \
                     Messages will be sent automatically at 8:00 AM.",
                    hour, minute
                ),
            });
        }

        if hour >= self.end_hour {
            return Err(DomainError::SendingWindowClosed {
                message: format!(
                    "SMS sending is not allowed after 8:00 PM (current time: {}:{:02}). \
                     Messages will be sent automatically at 8:00 AM tomorrow.",
                    hour, minute
                ),
            });
        }

        Ok(())
    }

    fn lagos_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(LAGOS_UTC_OFFSET_SECS)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        now.with_timezone(&offset)
    }
}
