//! Member repository trait defining read access to member records

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::member::Member;
use crate::errors::DomainError;

/// Read-only repository for member records
///
/// The SMS core never writes members; the CRUD surface owns mutation.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Fetch all members
    async fn get_members(&self) -> Result<Vec<Member>, DomainError>;

    /// Fetch a single member by id
    ///
    /// # Returns
    /// * `Ok(Some(Member))` - Member found
    /// * `Ok(None)` - No member with the given id
    /// * `Err(DomainError)` - Database error occurred
    async fn get_member(&self, id: Uuid) -> Result<Option<Member>, DomainError>;
}
