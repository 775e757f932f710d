pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::MemberRepository;

pub mod mock;
pub use mock::MockMemberRepository;
