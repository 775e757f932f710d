//! PostgreSQL implementation of the MemberRepository trait

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use shepherd_core::domain::entities::member::Member;
use shepherd_core::errors::DomainError;
use shepherd_core::repositories::MemberRepository;

/// PostgreSQL implementation of MemberRepository
///
/// Member records are owned by the CRUD surface; the SMS core only reads
/// them, so this implementation is read-only.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Create a new PostgreSQL member repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Member entity
    fn row_to_member(row: &sqlx::postgres::PgRow) -> Result<Member, DomainError> {
        Ok(Member {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            gender: row.try_get("gender").map_err(|e| DomainError::Internal {
                message: format!("Failed to get gender: {}", e),
            })?,
            department: row.try_get("department").map_err(|e| DomainError::Internal {
                message: format!("Failed to get department: {}", e),
            })?,
            birthday: row.try_get("birthday").map_err(|e| DomainError::Internal {
                message: format!("Failed to get birthday: {}", e),
            })?,
            status: row.try_get("status").map_err(|e| DomainError::Internal {
                message: format!("Failed to get status: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn get_members(&self) -> Result<Vec<Member>, DomainError> {
        let rows = sqlx::query("SELECT id, name, phone, gender, department, birthday, status FROM members ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch members: {}", e),
            })?;

        rows.iter().map(Self::row_to_member).collect()
    }

    async fn get_member(&self, id: Uuid) -> Result<Option<Member>, DomainError> {
        let row = sqlx::query("SELECT id, name, phone, gender, department, birthday, status FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to fetch member: {}", e),
            })?;

        row.as_ref().map(Self::row_to_member).transpose()
    }
}
