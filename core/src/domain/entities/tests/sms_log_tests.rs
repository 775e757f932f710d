//! Tests for the SmsLog entity

use uuid::Uuid;

use crate::domain::entities::sms_log::{SmsLog, SMS_STATUS_FAILED, SMS_STATUS_SENT};

#[test]
fn successful_send_starts_pending_with_message_id() {
    let log = SmsLog::new(
        "John Doe",
        "+2348012345678",
        "Hello John",
        Uuid::new_v4(),
        true,
        Some("12345".to_string()),
    );

    assert_eq!(log.status, SMS_STATUS_SENT);
    assert_eq!(log.delivery_status.as_deref(), Some("Pending"));
    assert_eq!(log.message_id.as_deref(), Some("12345"));
    assert!(log.is_pending());
}

#[test]
fn failed_send_carries_no_delivery_tracking() {
    let log = SmsLog::new(
        "John Doe",
        "+2348012345678",
        "Hello John",
        Uuid::new_v4(),
        false,
        Some("ignored".to_string()),
    );

    assert_eq!(log.status, SMS_STATUS_FAILED);
    assert!(log.delivery_status.is_none());
    assert!(log.message_id.is_none());
    assert!(!log.is_pending());
}

#[test]
fn composite_pending_status_still_counts_as_pending() {
    let mut log = SmsLog::new(
        "John Doe",
        "+2348012345678",
        "Hello John",
        Uuid::new_v4(),
        true,
        Some("12345".to_string()),
    );
    log.delivery_status = Some("Pending - queued at gateway".to_string());
    assert!(log.is_pending());

    log.delivery_status = Some("Delivered - DELIVERED".to_string());
    assert!(!log.is_pending());

    log.delivery_status = None;
    assert!(!log.is_pending());
}
