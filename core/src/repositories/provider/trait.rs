//! Provider repository trait defining access to SMS gateway configurations

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::provider::SmsProvider;
use crate::errors::DomainError;

/// Repository for SMS provider configurations
///
/// Provider records are created and edited through the settings CRUD
/// surface; the SMS core only reads them and refreshes the balance fields.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Fetch all configured providers
    async fn get_providers(&self) -> Result<Vec<SmsProvider>, DomainError>;

    /// Fetch a single provider by id
    async fn get_provider(&self, id: Uuid) -> Result<Option<SmsProvider>, DomainError>;

    /// Persist a freshly fetched balance string and stamp the check time
    ///
    /// The balance is stored verbatim as returned by the provider - no
    /// parsing or normalization happens on this path.
    async fn update_balance(&self, id: Uuid, balance: &str) -> Result<(), DomainError>;

    /// Convenience: the first provider flagged active, if any
    ///
    /// The core does not enforce an active-provider singleton; callers
    /// must pre-validate their settings.
    async fn get_active_provider(&self) -> Result<Option<SmsProvider>, DomainError> {
        let providers = self.get_providers().await?;
        Ok(providers.into_iter().find(|p| p.is_active))
    }
}
