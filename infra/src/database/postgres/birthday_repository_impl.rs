//! PostgreSQL implementation of the BirthdayRepository trait
//!
//! Guards the two correctness-critical invariants at the storage boundary:
//! at most one active birthday message (deactivate-others-then-activate
//! inside a transaction, with a partial unique index as the last line of
//! defense against concurrent activations) and one birthday log per
//! (member, calendar day).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shepherd_core::domain::entities::birthday_log::BirthdayLog;
use shepherd_core::domain::entities::birthday_message::{BirthdayMessage, BirthdayMessageUpdate};
use shepherd_core::errors::DomainError;
use shepherd_core::repositories::BirthdayRepository;

const UNIQUE_VIOLATION: &str = "23505";
const ACTIVE_MESSAGE_CONSTRAINT: &str = "birthday_messages_active_unique";
const LOG_DATE_CONSTRAINT: &str = "birthday_logs_member_date_unique";

const MESSAGE_COLUMNS: &str = "id, message, is_active, created_at, updated_at";
const LOG_COLUMNS: &str =
    "id, member_id, member_name, member_phone, message, sent_date, sent_at, status, provider_id";

/// PostgreSQL implementation of BirthdayRepository
pub struct PostgresBirthdayRepository {
    pool: PgPool,
}

impl PostgresBirthdayRepository {
    /// Create a new PostgreSQL birthday repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a BirthdayMessage entity
    fn row_to_message(row: &sqlx::postgres::PgRow) -> Result<BirthdayMessage, DomainError> {
        Ok(BirthdayMessage {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            message: row.try_get("message").map_err(|e| DomainError::Internal {
                message: format!("Failed to get message: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            created_at: row.try_get("created_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get created_at: {}", e),
            })?,
            updated_at: row.try_get("updated_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get updated_at: {}", e),
            })?,
        })
    }

    /// Convert a database row to a BirthdayLog entity
    fn row_to_log(row: &sqlx::postgres::PgRow) -> Result<BirthdayLog, DomainError> {
        Ok(BirthdayLog {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            member_id: row.try_get("member_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get member_id: {}", e),
            })?,
            member_name: row.try_get("member_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get member_name: {}", e),
            })?,
            member_phone: row.try_get("member_phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get member_phone: {}", e),
            })?,
            message: row.try_get("message").map_err(|e| DomainError::Internal {
                message: format!("Failed to get message: {}", e),
            })?,
            sent_date: row.try_get("sent_date").map_err(|e| DomainError::Internal {
                message: format!("Failed to get sent_date: {}", e),
            })?,
            sent_at: row.try_get("sent_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get sent_at: {}", e),
            })?,
            status: row.try_get("status").map_err(|e| DomainError::Internal {
                message: format!("Failed to get status: {}", e),
            })?,
            provider_id: row.try_get("provider_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get provider_id: {}", e),
            })?,
        })
    }

    /// Map a unique-index violation onto the matching validation error
    fn map_insert_error(err: sqlx::Error, context: &str) -> DomainError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint == ACTIVE_MESSAGE_CONSTRAINT {
                    return DomainError::Validation {
                        message: "Another birthday message is already active. \
                                  Please deactivate it first."
                            .to_string(),
                    };
                }
                if constraint == LOG_DATE_CONSTRAINT {
                    return DomainError::Validation {
                        message: "A birthday log already exists for this member today."
                            .to_string(),
                    };
                }
            }
        }
        DomainError::Internal {
            message: format!("{}: {}", context, err),
        }
    }
}

#[async_trait]
impl BirthdayRepository for PostgresBirthdayRepository {
    async fn get_messages(&self) -> Result<Vec<BirthdayMessage>, DomainError> {
        let query =
            format!("SELECT {MESSAGE_COLUMNS} FROM birthday_messages ORDER BY created_at DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch birthday messages: {}", e),
            })?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn get_active_message(&self) -> Result<Option<BirthdayMessage>, DomainError> {
        let query =
            format!("SELECT {MESSAGE_COLUMNS} FROM birthday_messages WHERE is_active = TRUE");
        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch active birthday message: {}", e),
            })?;

        row.as_ref().map(Self::row_to_message).transpose()
    }

    async fn create_message(
        &self,
        message: BirthdayMessage,
    ) -> Result<BirthdayMessage, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Inserting an active row deactivates every existing one first; the
        // partial unique index catches races between concurrent writers.
        if message.is_active {
            sqlx::query(
                "UPDATE birthday_messages SET is_active = FALSE, updated_at = $1 WHERE is_active = TRUE",
            )
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deactivate birthday messages: {}", e),
            })?;
        }

        sqlx::query(
            r#"
            INSERT INTO birthday_messages (id, message, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(&message.message)
        .bind(message.is_active)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::map_insert_error(e, "Failed to create birthday message"))?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit transaction: {}", e),
        })?;

        Ok(message)
    }

    async fn update_message(
        &self,
        id: Uuid,
        update: BirthdayMessageUpdate,
    ) -> Result<BirthdayMessage, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Activating this row deactivates every other one first; the
        // partial unique index catches races between concurrent updates.
        if update.is_active == Some(true) {
            sqlx::query("UPDATE birthday_messages SET is_active = FALSE, updated_at = $1 WHERE id <> $2 AND is_active = TRUE")
                .bind(Utc::now())
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to deactivate birthday messages: {}", e),
                })?;
        }

        let query = format!(
            r#"
            UPDATE birthday_messages
            SET message = COALESCE($1, message),
                is_active = COALESCE($2, is_active),
                updated_at = $3
            WHERE id = $4
            RETURNING {MESSAGE_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&update.message)
            .bind(update.is_active)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| Self::map_insert_error(e, "Failed to update birthday message"))?;

        let row = row.ok_or_else(|| DomainError::NotFound {
            resource: "BirthdayMessage".to_string(),
        })?;
        let message = Self::row_to_message(&row)?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit transaction: {}", e),
        })?;

        Ok(message)
    }

    async fn get_logs(&self) -> Result<Vec<BirthdayLog>, DomainError> {
        let query = format!("SELECT {LOG_COLUMNS} FROM birthday_logs ORDER BY sent_at DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch birthday logs: {}", e),
            })?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn get_logs_by_date(&self, sent_date: &str) -> Result<Vec<BirthdayLog>, DomainError> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM birthday_logs WHERE sent_date = $1 ORDER BY sent_at DESC"
        );
        let rows = sqlx::query(&query)
            .bind(sent_date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch birthday logs by date: {}", e),
            })?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn create_log(&self, log: BirthdayLog) -> Result<BirthdayLog, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO birthday_logs (
                id, member_id, member_name, member_phone, message,
                sent_date, sent_at, status, provider_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(log.id)
        .bind(log.member_id)
        .bind(&log.member_name)
        .bind(&log.member_phone)
        .bind(&log.message)
        .bind(&log.sent_date)
        .bind(log.sent_at)
        .bind(&log.status)
        .bind(log.provider_id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_insert_error(e, "Failed to create birthday log"))?;

        Ok(log)
    }

    async fn log_exists(&self, member_id: Uuid, sent_date: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM birthday_logs WHERE member_id = $1 AND sent_date = $2) AS found",
        )
        .bind(member_id)
        .bind(sent_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to check birthday log existence: {}", e),
        })?;

        row.try_get("found").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })
    }
}
