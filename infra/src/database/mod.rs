//! Database module - PostgreSQL implementations using SQLx
//!
//! Connection pool management plus the concrete repository implementations
//! behind the core's storage traits.

pub mod connection;
pub mod postgres;

pub use connection::create_pool;
pub use postgres::{
    PostgresBirthdayRepository, PostgresMemberRepository, PostgresProviderRepository,
    PostgresSmsLogRepository,
};
