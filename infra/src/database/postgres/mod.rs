//! PostgreSQL repository implementations

mod birthday_repository_impl;
mod member_repository_impl;
mod provider_repository_impl;
mod sms_log_repository_impl;

pub use birthday_repository_impl::PostgresBirthdayRepository;
pub use member_repository_impl::PostgresMemberRepository;
pub use provider_repository_impl::PostgresProviderRepository;
pub use sms_log_repository_impl::PostgresSmsLogRepository;
