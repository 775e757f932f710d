//! Mock implementation of MemberRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::member::Member;
use crate::errors::DomainError;

use super::trait_::MemberRepository;

/// Mock member repository for testing
#[derive(Default)]
pub struct MockMemberRepository {
    members: Arc<RwLock<HashMap<Uuid, Member>>>,
}

impl MockMemberRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a member
    pub async fn insert(&self, member: Member) {
        self.members.write().await.insert(member.id, member);
    }
}

#[async_trait]
impl MemberRepository for MockMemberRepository {
    async fn get_members(&self) -> Result<Vec<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.values().cloned().collect())
    }

    async fn get_member(&self, id: Uuid) -> Result<Option<Member>, DomainError> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }
}
