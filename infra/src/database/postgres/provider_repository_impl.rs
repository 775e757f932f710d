//! PostgreSQL implementation of the ProviderRepository trait

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use shepherd_core::domain::entities::provider::{AuthMethod, RequestMethod, SmsProvider};
use shepherd_core::errors::DomainError;
use shepherd_core::repositories::ProviderRepository;

const PROVIDER_COLUMNS: &str = "id, name, api_endpoint, auth_method, api_key, username, \
     password, request_method, sender, is_active, balance, last_balance_check";

/// PostgreSQL implementation of ProviderRepository
///
/// Provider rows are edited by the settings CRUD surface; the SMS core
/// only reads them and refreshes the balance columns.
pub struct PostgresProviderRepository {
    pool: PgPool,
}

impl PostgresProviderRepository {
    /// Create a new PostgreSQL provider repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an SmsProvider entity
    fn row_to_provider(row: &sqlx::postgres::PgRow) -> Result<SmsProvider, DomainError> {
        let auth_method: String = row.try_get("auth_method").map_err(|e| DomainError::Internal {
            message: format!("Failed to get auth_method: {}", e),
        })?;
        let request_method: String =
            row.try_get("request_method").map_err(|e| DomainError::Internal {
                message: format!("Failed to get request_method: {}", e),
            })?;

        Ok(SmsProvider {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            api_endpoint: row.try_get("api_endpoint").map_err(|e| DomainError::Internal {
                message: format!("Failed to get api_endpoint: {}", e),
            })?,
            auth_method: AuthMethod::from_str(&auth_method)
                .map_err(|e| DomainError::Internal { message: e })?,
            api_key: row.try_get("api_key").map_err(|e| DomainError::Internal {
                message: format!("Failed to get api_key: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Internal {
                message: format!("Failed to get username: {}", e),
            })?,
            password: row.try_get("password").map_err(|e| DomainError::Internal {
                message: format!("Failed to get password: {}", e),
            })?,
            request_method: RequestMethod::from_str(&request_method)
                .map_err(|e| DomainError::Internal { message: e })?,
            sender: row.try_get("sender").map_err(|e| DomainError::Internal {
                message: format!("Failed to get sender: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            balance: row.try_get("balance").map_err(|e| DomainError::Internal {
                message: format!("Failed to get balance: {}", e),
            })?,
            last_balance_check: row
                .try_get("last_balance_check")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_balance_check: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl ProviderRepository for PostgresProviderRepository {
    async fn get_providers(&self) -> Result<Vec<SmsProvider>, DomainError> {
        let query = format!("SELECT {PROVIDER_COLUMNS} FROM sms_providers ORDER BY created_at");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch providers: {}", e),
            })?;

        rows.iter().map(Self::row_to_provider).collect()
    }

    async fn get_provider(&self, id: Uuid) -> Result<Option<SmsProvider>, DomainError> {
        let query = format!("SELECT {PROVIDER_COLUMNS} FROM sms_providers WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch provider: {}", e),
            })?;

        row.as_ref().map(Self::row_to_provider).transpose()
    }

    async fn update_balance(&self, id: Uuid, balance: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE sms_providers SET balance = $1, last_balance_check = $2 WHERE id = $3",
        )
        .bind(balance)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update balance: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "SmsProvider".to_string(),
            });
        }
        Ok(())
    }
}
