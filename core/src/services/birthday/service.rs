//! Birthday message engine
//!
//! One invocation is a complete pass: gate on the sending window, find
//! today's birthday members, load the active template and provider, then
//! send per member with an idempotency check against the birthday log.
//! There is no persisted in-progress state; re-running on the same day is
//! safe because the (member, date) log pair is unique.

use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use shepherd_shared::utils::phone::mask_phone_number;

use crate::domain::entities::birthday_log::BirthdayLog;
use crate::domain::entities::sms_log::{SMS_STATUS_FAILED, SMS_STATUS_SENT};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BirthdayRepository, MemberRepository, ProviderRepository};
use crate::services::sending_window::SendingWindow;
use crate::services::sms_sender::SmsSender;

/// A member whose birthday send failed, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSend {
    pub name: String,
    pub error: String,
}

/// Per-member breakdown of a birthday run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthdayCheckDetails {
    pub sent: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedSend>,
}

/// Aggregate result of one birthday run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthdayCheckResult {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub details: BirthdayCheckDetails,
    pub message: Option<String>,
}

/// Orchestrates birthday message sending
pub struct BirthdayService<M, P, B, S>
where
    M: MemberRepository,
    P: ProviderRepository,
    B: BirthdayRepository,
    S: SmsSender,
{
    member_repository: Arc<M>,
    provider_repository: Arc<P>,
    birthday_repository: Arc<B>,
    sms_sender: Arc<S>,
    sending_window: SendingWindow,
}

impl<M, P, B, S> BirthdayService<M, P, B, S>
where
    M: MemberRepository,
    P: ProviderRepository,
    B: BirthdayRepository,
    S: SmsSender,
{
    /// Create a new birthday service
    pub fn new(
        member_repository: Arc<M>,
        provider_repository: Arc<P>,
        birthday_repository: Arc<B>,
        sms_sender: Arc<S>,
    ) -> Self {
        Self {
            member_repository,
            provider_repository,
            birthday_repository,
            sms_sender,
            sending_window: SendingWindow::new(),
        }
    }

    /// Run a birthday pass against the current wall clock
    pub async fn check_and_send_birthday_messages(&self) -> DomainResult<BirthdayCheckResult> {
        self.check_and_send_at(Utc::now()).await
    }

    /// Run a birthday pass against an explicit instant
    pub async fn check_and_send_at(&self, now: DateTime<Utc>) -> DomainResult<BirthdayCheckResult> {
        self.sending_window.check(now)?;

        let today_month_day = format!("{:02}-{:02}", now.month(), now.day());
        let today_full_date = now.format("%Y-%m-%d").to_string();

        let members = self.member_repository.get_members().await?;
        let birthday_members: Vec<_> = members
            .into_iter()
            .filter(|m| m.is_active() && m.has_birthday_on(&today_month_day))
            .collect();

        if birthday_members.is_empty() {
            info!(date = %today_full_date, "No birthdays today");
            return Ok(BirthdayCheckResult {
                message: Some("No birthdays today".to_string()),
                ..Default::default()
            });
        }

        let active_message = self
            .birthday_repository
            .get_active_message()
            .await?
            .ok_or_else(|| DomainError::Configuration {
                message: "No active birthday message template found. \
                          Please activate a birthday message in settings."
                    .to_string(),
            })?;

        let active_provider = self
            .provider_repository
            .get_active_provider()
            .await?
            .ok_or_else(|| DomainError::Configuration {
                message: "No active SMS provider found. \
                          Please activate an SMS provider in settings."
                    .to_string(),
            })?;

        let mut result = BirthdayCheckResult::default();

        for member in birthday_members {
            let already_sent = match self
                .birthday_repository
                .log_exists(member.id, &today_full_date)
                .await
            {
                Ok(exists) => exists,
                Err(err) => {
                    result.failed += 1;
                    result.details.failed.push(FailedSend {
                        name: member.name.clone(),
                        error: err.to_string(),
                    });
                    error!(member = %member.name, error = %err, "Birthday idempotency check failed");
                    continue;
                }
            };

            if already_sent {
                result.skipped += 1;
                result.details.skipped.push(member.name.clone());
                continue;
            }

            // Personalize the greeting; the sender renders any remaining tags.
            let personalized = active_message
                .message
                .replace("{{name}}", member.first_name());

            info!(
                member = %member.name,
                phone = %mask_phone_number(&member.phone),
                "Sending birthday SMS"
            );

            let outcome = self
                .sms_sender
                .send_sms(&active_provider, &member, &personalized)
                .await;

            let status = if outcome.success {
                SMS_STATUS_SENT
            } else {
                SMS_STATUS_FAILED
            };

            let log = BirthdayLog::new(
                member.id,
                member.name.clone(),
                member.phone.clone(),
                outcome.processed_message.clone(),
                today_full_date.clone(),
                status.to_string(),
                active_provider.id,
            );

            if let Err(err) = self.birthday_repository.create_log(log).await {
                result.failed += 1;
                result.details.failed.push(FailedSend {
                    name: member.name.clone(),
                    error: err.to_string(),
                });
                error!(member = %member.name, error = %err, "Failed to record birthday log");
                continue;
            }

            if outcome.success {
                result.sent += 1;
                result.details.sent.push(member.name.clone());
            } else {
                let error = outcome
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string());
                warn!(member = %member.name, error = %error, "Birthday SMS failed");
                result.failed += 1;
                result.details.failed.push(FailedSend {
                    name: member.name,
                    error,
                });
            }
        }

        info!(
            sent = result.sent,
            skipped = result.skipped,
            failed = result.failed,
            "Birthday run complete"
        );
        Ok(result)
    }
}
