//! Provider balance refresh
//!
//! Only the NigeriaBulkSMS family exposes a balance query today; every
//! other provider gets an explicit "not supported" result rather than a
//! guess. The raw response text is persisted verbatim as the balance.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use shepherd_core::domain::entities::provider::{AuthMethod, SmsProvider};
use shepherd_core::repositories::ProviderRepository;

use crate::{InfraResult, InfrastructureError};

const BALANCE_ENDPOINT: &str = "https://portal.nigeriabulksms.com/api/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one provider's balance fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceFetchResult {
    pub provider_id: Uuid,
    pub provider_name: String,
    pub success: bool,
    pub balance: Option<String>,
    pub error: Option<String>,
}

impl BalanceFetchResult {
    fn failure(provider_id: Uuid, provider_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider_id,
            provider_name: provider_name.into(),
            success: false,
            balance: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregate of a full balance refresh pass
#[derive(Debug, Clone, Default)]
pub struct BalanceFetchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BalanceFetchResult>,
}

/// Query parameters for the balance endpoint, mirroring the provider's
/// own auth method. Note the key is `apikey`, not `api_key` - the balance
/// endpoint predates the send endpoint's naming.
pub(crate) fn build_balance_params(provider: &SmsProvider) -> Vec<(String, String)> {
    let mut params = Vec::new();
    match provider.auth_method {
        AuthMethod::ApiKey => {
            params.push((
                "apikey".to_string(),
                provider.api_key.clone().unwrap_or_default(),
            ));
        }
        AuthMethod::UsernamePassword => {
            params.push((
                "username".to_string(),
                provider.username.clone().unwrap_or_default(),
            ));
            params.push((
                "password".to_string(),
                provider.password.clone().unwrap_or_default(),
            ));
        }
    }
    params.push(("action".to_string(), "balance".to_string()));
    params
}

/// Whether the balance endpoint supports this provider
pub(crate) fn supports_balance_check(provider: &SmsProvider) -> bool {
    provider.name.to_lowercase().contains("nigeriabulksms")
}

/// Fetches and persists provider balances
pub struct BalanceFetchService<P>
where
    P: ProviderRepository,
{
    provider_repository: Arc<P>,
    client: reqwest::Client,
}

impl<P> BalanceFetchService<P>
where
    P: ProviderRepository,
{
    pub fn new(provider_repository: Arc<P>) -> InfraResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            provider_repository,
            client,
        })
    }

    /// Refresh every provider's balance, one at a time.
    ///
    /// A single provider's failure lands in its result entry; the pass
    /// always covers the full provider list.
    pub async fn fetch_all_provider_balances(&self) -> InfraResult<BalanceFetchSummary> {
        let providers = self
            .provider_repository
            .get_providers()
            .await
            .map_err(InfrastructureError::Domain)?;

        let mut results = Vec::with_capacity(providers.len());
        for provider in &providers {
            results.push(self.fetch_provider_balance(provider.id).await);
        }

        let successful = results.iter().filter(|r| r.success).count();
        let summary = BalanceFetchSummary {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        };

        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "Balance refresh complete"
        );
        Ok(summary)
    }

    /// Fetch one provider's balance and persist it
    pub async fn fetch_provider_balance(&self, provider_id: Uuid) -> BalanceFetchResult {
        let provider = match self.provider_repository.get_provider(provider_id).await {
            Ok(Some(provider)) => provider,
            Ok(None) => {
                return BalanceFetchResult::failure(provider_id, "Unknown", "Provider not found")
            }
            Err(err) => {
                warn!(provider_id = %provider_id, error = %err, "Balance lookup failed");
                return BalanceFetchResult::failure(provider_id, "Unknown", err.to_string());
            }
        };

        if !supports_balance_check(&provider) {
            return BalanceFetchResult::failure(
                provider.id,
                provider.name,
                "Balance check not supported for this provider",
            );
        }

        match self.fetch_nigeria_bulk_sms_balance(&provider).await {
            Ok(balance) => BalanceFetchResult {
                provider_id: provider.id,
                provider_name: provider.name,
                success: true,
                balance: Some(balance),
                error: None,
            },
            Err(err) => {
                warn!(provider = %provider.name, error = %err, "Balance fetch failed");
                BalanceFetchResult::failure(provider.id, provider.name, err.to_string())
            }
        }
    }

    async fn fetch_nigeria_bulk_sms_balance(
        &self,
        provider: &SmsProvider,
    ) -> InfraResult<String> {
        let params = build_balance_params(provider);
        let response = self
            .client
            .get(BALANCE_ENDPOINT)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::General(format!(
                "Balance API returned status {}",
                status.as_u16()
            )));
        }

        let balance = response.text().await?;

        self.provider_repository
            .update_balance(provider.id, &balance)
            .await
            .map_err(InfrastructureError::Domain)?;

        info!(provider = %provider.name, balance = %balance, "Balance fetched");
        Ok(balance)
    }
}
