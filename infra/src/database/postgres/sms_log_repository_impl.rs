//! PostgreSQL implementation of the SmsLogRepository trait

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shepherd_core::domain::entities::sms_log::SmsLog;
use shepherd_core::errors::DomainError;
use shepherd_core::repositories::SmsLogRepository;

const LOG_COLUMNS: &str = "id, recipient_name, recipient_phone, message, provider_id, status, \
     sent_at, delivery_status, message_id, last_checked";

/// PostgreSQL implementation of SmsLogRepository
pub struct PostgresSmsLogRepository {
    pool: PgPool,
}

impl PostgresSmsLogRepository {
    /// Create a new PostgreSQL SMS log repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an SmsLog entity
    fn row_to_log(row: &sqlx::postgres::PgRow) -> Result<SmsLog, DomainError> {
        Ok(SmsLog {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            recipient_name: row.try_get("recipient_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get recipient_name: {}", e),
            })?,
            recipient_phone: row.try_get("recipient_phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get recipient_phone: {}", e),
            })?,
            message: row.try_get("message").map_err(|e| DomainError::Internal {
                message: format!("Failed to get message: {}", e),
            })?,
            provider_id: row.try_get("provider_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get provider_id: {}", e),
            })?,
            status: row.try_get("status").map_err(|e| DomainError::Internal {
                message: format!("Failed to get status: {}", e),
            })?,
            sent_at: row.try_get("sent_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get sent_at: {}", e),
            })?,
            delivery_status: row.try_get("delivery_status").map_err(|e| DomainError::Internal {
                message: format!("Failed to get delivery_status: {}", e),
            })?,
            message_id: row.try_get("message_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get message_id: {}", e),
            })?,
            last_checked: row.try_get("last_checked").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_checked: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl SmsLogRepository for PostgresSmsLogRepository {
    async fn get_logs(&self) -> Result<Vec<SmsLog>, DomainError> {
        let query = format!("SELECT {LOG_COLUMNS} FROM sms_logs ORDER BY sent_at DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch SMS logs: {}", e),
            })?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn create_log(&self, log: SmsLog) -> Result<SmsLog, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sms_logs (
                id, recipient_name, recipient_phone, message, provider_id, status,
                sent_at, delivery_status, message_id, last_checked
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(log.id)
        .bind(&log.recipient_name)
        .bind(&log.recipient_phone)
        .bind(&log.message)
        .bind(log.provider_id)
        .bind(&log.status)
        .bind(log.sent_at)
        .bind(&log.delivery_status)
        .bind(&log.message_id)
        .bind(log.last_checked)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to create SMS log: {}", e),
        })?;

        Ok(log)
    }

    async fn update_delivery_status(&self, id: Uuid, status: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE sms_logs SET delivery_status = $1, last_checked = $2 WHERE id = $3",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update delivery status: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "SmsLog".to_string(),
            });
        }
        Ok(())
    }
}
