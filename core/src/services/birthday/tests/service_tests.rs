//! Birthday engine behaviour tests
//!
//! All tests pin the clock to 2025-03-15 09:00 UTC (10:00 Lagos), inside
//! the sending window, unless exercising the window gate itself.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::birthday_message::BirthdayMessage;
use crate::domain::entities::member::Member;
use crate::domain::entities::provider::{AuthMethod, RequestMethod, SmsProvider};
use crate::errors::DomainError;
use crate::repositories::{
    BirthdayRepository, MockBirthdayRepository, MockMemberRepository, MockProviderRepository,
};
use crate::services::birthday::BirthdayService;

use super::mocks::MockSmsSender;

fn in_window() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap()
}

fn member(name: &str, birthday: Option<&str>, status: &str) -> Member {
    Member {
        id: Uuid::new_v4(),
        name: name.to_string(),
        phone: "+2348012345678".to_string(),
        gender: "Male".to_string(),
        department: "Choir".to_string(),
        birthday: birthday.map(str::to_string),
        status: status.to_string(),
    }
}

fn provider(is_active: bool) -> SmsProvider {
    SmsProvider {
        id: Uuid::new_v4(),
        name: "NigeriaBulkSMS".to_string(),
        api_endpoint: "https://portal.nigeriabulksms.com/api/".to_string(),
        auth_method: AuthMethod::UsernamePassword,
        api_key: None,
        username: Some("church".to_string()),
        password: Some("secret".to_string()),
        request_method: RequestMethod::Get,
        sender: Some("Church".to_string()),
        is_active,
        balance: None,
        last_balance_check: None,
    }
}

fn active_template(text: &str) -> BirthdayMessage {
    BirthdayMessage::new(text, true)
}

struct Fixture {
    members: Arc<MockMemberRepository>,
    providers: Arc<MockProviderRepository>,
    birthdays: Arc<MockBirthdayRepository>,
    sender: Arc<MockSmsSender>,
}

impl Fixture {
    fn new(sender: MockSmsSender) -> Self {
        Self {
            members: Arc::new(MockMemberRepository::new()),
            providers: Arc::new(MockProviderRepository::new()),
            birthdays: Arc::new(MockBirthdayRepository::new()),
            sender: Arc::new(sender),
        }
    }

    fn service(
        &self,
    ) -> BirthdayService<
        MockMemberRepository,
        MockProviderRepository,
        MockBirthdayRepository,
        MockSmsSender,
    > {
        BirthdayService::new(
            self.members.clone(),
            self.providers.clone(),
            self.birthdays.clone(),
            self.sender.clone(),
        )
    }
}

#[tokio::test]
async fn no_birthdays_returns_zero_summary() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("Jane Doe", Some("1990-12-25"), "Active"))
        .await;

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();

    assert_eq!(result.sent, 0);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.failed, 0);
    assert_eq!(result.message.as_deref(), Some("No birthdays today"));
}

#[tokio::test]
async fn sends_personalized_message_and_logs_it() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("John Doe", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(true)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();

    assert_eq!(result.sent, 1);
    assert_eq!(result.details.sent, vec!["John Doe".to_string()]);

    let sent = fixture.sender.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, "Happy Birthday John!");

    let logs = fixture.birthdays.get_logs_by_date("2025-03-15").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "Sent");
    assert_eq!(logs[0].message, "Happy Birthday John!");
    assert_eq!(logs[0].member_name, "John Doe");
}

#[tokio::test]
async fn second_run_same_day_skips_member() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("John Doe", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(true)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;

    let service = fixture.service();
    let first = service.check_and_send_at(in_window()).await.unwrap();
    assert_eq!(first.sent, 1);

    let second = service.check_and_send_at(in_window()).await.unwrap();
    assert_eq!(second.sent, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.details.skipped, vec!["John Doe".to_string()]);
    assert_eq!(fixture.birthdays.log_count().await, 1);
    assert_eq!(fixture.sender.sent_messages().await.len(), 1);
}

#[tokio::test]
async fn failed_send_still_writes_log_row() {
    let fixture = Fixture::new(MockSmsSender::failing("Invalid authentication credentials."));
    fixture
        .members
        .insert(member("John Doe", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(true)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();

    assert_eq!(result.failed, 1);
    assert_eq!(result.details.failed[0].name, "John Doe");
    assert_eq!(
        result.details.failed[0].error,
        "Invalid authentication credentials."
    );

    let logs = fixture.birthdays.get_logs_by_date("2025-03-15").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "Failed");
}

#[tokio::test]
async fn matches_both_birthday_formats() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("Full Date", Some("1990-03-15"), "Active"))
        .await;
    fixture
        .members
        .insert(member("Short Date", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(true)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();
    assert_eq!(result.sent, 2);
}

#[tokio::test]
async fn ignores_inactive_members_and_missing_birthdays() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("Inactive", Some("03-15"), "Inactive"))
        .await;
    fixture.members.insert(member("No Birthday", None, "Active")).await;

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();
    assert_eq!(result.message.as_deref(), Some("No birthdays today"));
}

#[tokio::test]
async fn rejects_run_outside_sending_window() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    // 06:30 UTC is 07:30 Lagos, before the window opens
    let early = Utc.with_ymd_and_hms(2025, 3, 15, 6, 30, 0).unwrap();

    let err = fixture.service().check_and_send_at(early).await.unwrap_err();
    assert!(matches!(err, DomainError::SendingWindowClosed { .. }));
    assert!(err.to_string().contains("not allowed before 8:00 AM"));
}

#[tokio::test]
async fn missing_active_template_is_a_configuration_error() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("John Doe", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(true)).await;

    let err = fixture.service().check_and_send_at(in_window()).await.unwrap_err();
    assert!(matches!(err, DomainError::Configuration { .. }));
    assert!(err.to_string().contains("No active birthday message template found"));
}

#[tokio::test]
async fn missing_active_provider_is_a_configuration_error() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    fixture
        .members
        .insert(member("John Doe", Some("03-15"), "Active"))
        .await;
    fixture.providers.insert(provider(false)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;

    let err = fixture.service().check_and_send_at(in_window()).await.unwrap_err();
    assert!(matches!(err, DomainError::Configuration { .. }));
    assert!(err.to_string().contains("No active SMS provider found"));
}

#[tokio::test]
async fn pre_logged_member_is_skipped_while_others_send() {
    let fixture = Fixture::new(MockSmsSender::succeeding());
    let mut first = member("First Member", Some("03-15"), "Active");
    first.phone = "+2348000000001".to_string();
    let mut second = member("Second Member", Some("03-15"), "Active");
    second.phone = "+2348000000002".to_string();

    // Pre-log the first member so only the second gets a send
    fixture.members.insert(first.clone()).await;
    fixture.members.insert(second).await;
    fixture.providers.insert(provider(true)).await;
    fixture
        .birthdays
        .insert_message(active_template("Happy Birthday {{name}}!"))
        .await;
    fixture
        .birthdays
        .create_log(crate::domain::entities::birthday_log::BirthdayLog::new(
            first.id,
            first.name.clone(),
            first.phone.clone(),
            "Happy Birthday First!".to_string(),
            "2025-03-15".to_string(),
            "Sent".to_string(),
            Uuid::new_v4(),
        ))
        .await
        .unwrap();

    let result = fixture.service().check_and_send_at(in_window()).await.unwrap();
    assert_eq!(result.skipped, 1);
    assert_eq!(result.sent, 1);
}
