//! Mock implementation of ProviderRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::provider::SmsProvider;
use crate::errors::DomainError;

use super::trait_::ProviderRepository;

/// Mock provider repository for testing
///
/// Providers are kept in insertion order so "first active" selection is
/// deterministic in tests.
#[derive(Default)]
pub struct MockProviderRepository {
    providers: Arc<RwLock<Vec<SmsProvider>>>,
}

impl MockProviderRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a provider
    pub async fn insert(&self, provider: SmsProvider) {
        self.providers.write().await.push(provider);
    }
}

#[async_trait]
impl ProviderRepository for MockProviderRepository {
    async fn get_providers(&self) -> Result<Vec<SmsProvider>, DomainError> {
        Ok(self.providers.read().await.clone())
    }

    async fn get_provider(&self, id: Uuid) -> Result<Option<SmsProvider>, DomainError> {
        let providers = self.providers.read().await;
        Ok(providers.iter().find(|p| p.id == id).cloned())
    }

    async fn update_balance(&self, id: Uuid, balance: &str) -> Result<(), DomainError> {
        let mut providers = self.providers.write().await;
        match providers.iter_mut().find(|p| p.id == id) {
            Some(provider) => {
                provider.balance = Some(balance.to_string());
                provider.last_balance_check = Some(Utc::now());
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "SmsProvider".to_string(),
            }),
        }
    }
}
