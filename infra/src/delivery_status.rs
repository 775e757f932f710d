//! Delivery status polling for sent messages
//!
//! Providers report delivery through a free-text status endpoint; the
//! report is classified with three word-boundary pattern groups tried in
//! order (delivered, failed, pending). Anything unmatched stays Unknown
//! and keeps the raw body as details.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use shepherd_core::domain::entities::provider::SmsProvider;
use shepherd_core::repositories::{ProviderRepository, SmsLogRepository};

use crate::{InfraResult, InfrastructureError};

const REPORT_ENDPOINT: &str = "https://portal.nigeriabulksms.com/api/report/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static DELIVERED_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(delivered|success|successful)\b").expect("valid delivered pattern")
});
static FAILED_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(failed|failure|error|rejected|invalid|undelivered)\b")
        .expect("valid failed pattern")
});
static PENDING_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(pending|sent|queued|processing|submitted)\b")
        .expect("valid pending pattern")
});

/// Classified delivery state of a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed,
    Pending,
    Unknown,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Failed => "Failed",
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the detail string persisted into the SMS log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatusReport {
    pub status: DeliveryStatus,
    pub details: String,
}

impl DeliveryStatusReport {
    fn unknown(details: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Unknown,
            details: details.into(),
        }
    }
}

/// Classify a raw status-report body.
///
/// Pattern groups are tried in order and the first match wins; a body
/// containing both "delivered" and "failed" counts as delivered.
pub fn classify_report(body: &str) -> DeliveryStatusReport {
    let trimmed = body.trim();

    if DELIVERED_PATTERNS.is_match(trimmed) {
        DeliveryStatusReport {
            status: DeliveryStatus::Delivered,
            details: format!("Delivered - {body}"),
        }
    } else if FAILED_PATTERNS.is_match(trimmed) {
        DeliveryStatusReport {
            status: DeliveryStatus::Failed,
            details: format!("Failed - {body}"),
        }
    } else if PENDING_PATTERNS.is_match(trimmed) {
        DeliveryStatusReport {
            status: DeliveryStatus::Pending,
            details: format!("Pending - {body}"),
        }
    } else {
        DeliveryStatusReport::unknown(body)
    }
}

/// Queries a provider for the delivery state of one message
#[async_trait]
pub trait DeliveryStatusProbe: Send + Sync {
    async fn probe(&self, message_id: &str, provider: &SmsProvider) -> DeliveryStatusReport;
}

/// Probe backed by the provider's GET report endpoint
pub struct HttpDeliveryStatusProbe {
    client: reqwest::Client,
}

impl HttpDeliveryStatusProbe {
    pub fn new() -> InfraResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DeliveryStatusProbe for HttpDeliveryStatusProbe {
    async fn probe(&self, message_id: &str, provider: &SmsProvider) -> DeliveryStatusReport {
        if message_id.is_empty() {
            return DeliveryStatusReport::unknown("Missing provider or message ID");
        }

        // Local guard: the report endpoint only speaks username/password.
        if !provider.has_credentials() {
            return DeliveryStatusReport::unknown("Provider credentials not configured");
        }

        let params = [
            ("username", provider.username.as_deref().unwrap_or("")),
            ("password", provider.password.as_deref().unwrap_or("")),
            ("message_id", message_id),
        ];

        let body = match self.client.get(REPORT_ENDPOINT).query(&params).send().await {
            Ok(response) => match response.text().await {
                Ok(text) => text,
                Err(err) => return DeliveryStatusReport::unknown(err.to_string()),
            },
            Err(err) => return DeliveryStatusReport::unknown(err.to_string()),
        };

        debug!(message_id = %message_id, body = %body, "Delivery status response");
        classify_report(&body)
    }
}

/// Aggregate counters for one polling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryCheckSummary {
    pub checked: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Polls pending SMS logs and persists refreshed delivery states
pub struct DeliveryStatusService<P, L, C>
where
    P: ProviderRepository,
    L: SmsLogRepository,
    C: DeliveryStatusProbe,
{
    provider_repository: Arc<P>,
    sms_log_repository: Arc<L>,
    probe: Arc<C>,
}

impl<P, L, C> DeliveryStatusService<P, L, C>
where
    P: ProviderRepository,
    L: SmsLogRepository,
    C: DeliveryStatusProbe,
{
    pub fn new(provider_repository: Arc<P>, sms_log_repository: Arc<L>, probe: Arc<C>) -> Self {
        Self {
            provider_repository,
            sms_log_repository,
            probe,
        }
    }

    /// Check every log still marked pending.
    ///
    /// One bad record never aborts the batch: per-log failures write an
    /// `Error - ...` status into the log and bump the error counter.
    pub async fn check_pending_messages(&self) -> InfraResult<DeliveryCheckSummary> {
        let logs = self.sms_log_repository.get_logs().await.map_err(InfrastructureError::Domain)?;

        let pending: Vec<_> = logs.into_iter().filter(|log| log.is_pending()).collect();
        let mut summary = DeliveryCheckSummary::default();

        for log in pending {
            let message_id = match log.message_id.as_deref() {
                Some(id) => id,
                None => continue,
            };

            let provider = match self.provider_repository.get_provider(log.provider_id).await {
                Ok(Some(provider)) => provider,
                Ok(None) => {
                    self.write_error_status(log.id, "Error - Provider not found").await;
                    summary.errors += 1;
                    continue;
                }
                Err(err) => {
                    self.write_error_status(log.id, &format!("Error - {err}")).await;
                    summary.errors += 1;
                    continue;
                }
            };

            let report = self.probe.probe(message_id, &provider).await;

            match self
                .sms_log_repository
                .update_delivery_status(log.id, &report.details)
                .await
            {
                Ok(()) => {
                    summary.checked += 1;
                    if report.status != DeliveryStatus::Pending {
                        summary.updated += 1;
                    }
                }
                Err(err) => {
                    error!(log_id = %log.id, error = %err, "Failed to persist delivery status");
                    summary.errors += 1;
                }
            }
        }

        info!(
            checked = summary.checked,
            updated = summary.updated,
            errors = summary.errors,
            "Delivery status pass complete"
        );
        Ok(summary)
    }

    async fn write_error_status(&self, log_id: uuid::Uuid, status: &str) {
        if let Err(err) = self
            .sms_log_repository
            .update_delivery_status(log_id, status)
            .await
        {
            error!(log_id = %log_id, error = %err, "Failed to record delivery status error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shepherd_core::domain::entities::provider::{AuthMethod, RequestMethod};
    use shepherd_core::domain::entities::sms_log::SmsLog;
    use shepherd_core::repositories::{MockProviderRepository, MockSmsLogRepository};
    use uuid::Uuid;

    fn provider() -> SmsProvider {
        SmsProvider {
            id: Uuid::new_v4(),
            name: "NigeriaBulkSMS".to_string(),
            api_endpoint: "https://portal.nigeriabulksms.com/api/".to_string(),
            auth_method: AuthMethod::UsernamePassword,
            api_key: None,
            username: Some("church".to_string()),
            password: Some("secret".to_string()),
            request_method: RequestMethod::Get,
            sender: None,
            is_active: true,
            balance: None,
            last_balance_check: None,
        }
    }

    struct ScriptedProbe {
        body: String,
    }

    #[async_trait]
    impl DeliveryStatusProbe for ScriptedProbe {
        async fn probe(&self, _message_id: &str, _provider: &SmsProvider) -> DeliveryStatusReport {
            classify_report(&self.body)
        }
    }

    #[test]
    fn classifies_delivered_bodies() {
        let report = classify_report("DELIVERED");
        assert_eq!(report.status, DeliveryStatus::Delivered);
        assert_eq!(report.details, "Delivered - DELIVERED");

        assert_eq!(classify_report("Success").status, DeliveryStatus::Delivered);
    }

    #[test]
    fn classifies_failed_bodies() {
        let report = classify_report("message rejected by carrier");
        assert_eq!(report.status, DeliveryStatus::Failed);
        assert_eq!(report.details, "Failed - message rejected by carrier");
    }

    #[test]
    fn classifies_pending_bodies() {
        let report = classify_report("queued for delivery");
        // "delivery" does not match the delivered patterns at a word boundary
        assert_eq!(report.status, DeliveryStatus::Pending);
        assert_eq!(report.details, "Pending - queued for delivery");
    }

    #[test]
    fn delivered_wins_over_failed_in_mixed_bodies() {
        let report = classify_report("delivered after one failed attempt");
        assert_eq!(report.status, DeliveryStatus::Delivered);
    }

    #[test]
    fn word_boundaries_prevent_substring_matches() {
        // "undeliverable" must not match "delivered" nor "undelivered"
        let report = classify_report("undeliverable");
        assert_eq!(report.status, DeliveryStatus::Unknown);
        assert_eq!(report.details, "undeliverable");
    }

    #[test]
    fn unmatched_body_is_unknown_with_raw_details() {
        let report = classify_report("42");
        assert_eq!(report.status, DeliveryStatus::Unknown);
        assert_eq!(report.details, "42");
    }

    #[tokio::test]
    async fn pending_log_with_delivered_report_is_updated() {
        let providers = Arc::new(MockProviderRepository::new());
        let logs = Arc::new(MockSmsLogRepository::new());
        let p = provider();
        providers.insert(p.clone()).await;

        let log = SmsLog::new(
            "John Doe".to_string(),
            "+2348012345678".to_string(),
            "Hello".to_string(),
            p.id,
            true,
            Some("98765".to_string()),
        );
        let log_id = log.id;
        logs.create_log(log).await.unwrap();

        let service = DeliveryStatusService::new(
            providers,
            logs.clone(),
            Arc::new(ScriptedProbe {
                body: "DELIVERED".to_string(),
            }),
        );

        let summary = service.check_pending_messages().await.unwrap();
        assert_eq!(summary.checked, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.errors, 0);

        let updated = logs.get_log(log_id).await.unwrap();
        assert_eq!(updated.delivery_status.as_deref(), Some("Delivered - DELIVERED"));
        assert!(updated.last_checked.is_some());
    }

    #[tokio::test]
    async fn still_pending_report_counts_checked_but_not_updated() {
        let providers = Arc::new(MockProviderRepository::new());
        let logs = Arc::new(MockSmsLogRepository::new());
        let p = provider();
        providers.insert(p.clone()).await;

        let log = SmsLog::new(
            "John Doe".to_string(),
            "+2348012345678".to_string(),
            "Hello".to_string(),
            p.id,
            true,
            Some("98765".to_string()),
        );
        logs.create_log(log).await.unwrap();

        let service = DeliveryStatusService::new(
            providers,
            logs,
            Arc::new(ScriptedProbe {
                body: "queued".to_string(),
            }),
        );

        let summary = service.check_pending_messages().await.unwrap();
        assert_eq!(summary.checked, 1);
        assert_eq!(summary.updated, 0);
    }

    #[tokio::test]
    async fn missing_provider_writes_error_status() {
        let providers = Arc::new(MockProviderRepository::new());
        let logs = Arc::new(MockSmsLogRepository::new());

        let log = SmsLog::new(
            "John Doe".to_string(),
            "+2348012345678".to_string(),
            "Hello".to_string(),
            Uuid::new_v4(),
            true,
            Some("98765".to_string()),
        );
        let log_id = log.id;
        logs.create_log(log).await.unwrap();

        let service = DeliveryStatusService::new(
            providers,
            logs.clone(),
            Arc::new(ScriptedProbe {
                body: "DELIVERED".to_string(),
            }),
        );

        let summary = service.check_pending_messages().await.unwrap();
        assert_eq!(summary.checked, 0);
        assert_eq!(summary.errors, 1);

        let updated = logs.get_log(log_id).await.unwrap();
        assert_eq!(
            updated.delivery_status.as_deref(),
            Some("Error - Provider not found")
        );
    }

    #[tokio::test]
    async fn failed_and_prefixed_pending_logs_are_scanned() {
        let providers = Arc::new(MockProviderRepository::new());
        let logs = Arc::new(MockSmsLogRepository::new());
        let p = provider();
        providers.insert(p.clone()).await;

        // Failed send: no delivery status, must not be scanned
        let failed = SmsLog::new(
            "A".to_string(),
            "+2348000000001".to_string(),
            "Hello".to_string(),
            p.id,
            false,
            None,
        );
        logs.create_log(failed.clone()).await.unwrap();

        // Composite "Pending - ..." status must still match
        let mut prefixed = SmsLog::new(
            "B".to_string(),
            "+2348000000002".to_string(),
            "Hello".to_string(),
            p.id,
            true,
            Some("id-2".to_string()),
        );
        prefixed.delivery_status = Some("Pending - queued".to_string());
        logs.create_log(prefixed).await.unwrap();

        let service = DeliveryStatusService::new(
            providers,
            logs,
            Arc::new(ScriptedProbe {
                body: "DELIVERED".to_string(),
            }),
        );

        let summary = service.check_pending_messages().await.unwrap();
        assert_eq!(summary.checked, 1);
        assert_eq!(summary.updated, 1);
    }
}
