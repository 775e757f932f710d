//! Scheduler host process
//!
//! Wires the PostgreSQL repositories, the SMS transport, and the three
//! recurring jobs together. The CRUD/API surface runs as a separate
//! deployment; this process only owns the scheduled work.

use std::sync::Arc;
use tracing::info;

use shepherd_core::services::birthday::BirthdayService;
use shepherd_infra::balance::BalanceFetchService;
use shepherd_infra::database::{
    create_pool, PostgresBirthdayRepository, PostgresMemberRepository, PostgresProviderRepository,
    PostgresSmsLogRepository,
};
use shepherd_infra::delivery_status::{DeliveryStatusService, HttpDeliveryStatusProbe};
use shepherd_infra::scheduler;
use shepherd_infra::sms::HttpSmsSender;
use shepherd_infra::{InfraResult, InfrastructureError};
use shepherd_shared::config::environment::init_tracing;
use shepherd_shared::config::AppConfig;

#[tokio::main]
async fn main() -> InfraResult<()> {
    let config = AppConfig::from_env();
    init_tracing(config.environment);

    let pool = create_pool(&config.database).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    let members = Arc::new(PostgresMemberRepository::new(pool.clone()));
    let providers = Arc::new(PostgresProviderRepository::new(pool.clone()));
    let birthdays = Arc::new(PostgresBirthdayRepository::new(pool.clone()));
    let sms_logs = Arc::new(PostgresSmsLogRepository::new(pool.clone()));

    let sms_sender = Arc::new(HttpSmsSender::new()?);
    let birthday_service = Arc::new(BirthdayService::new(
        members,
        providers.clone(),
        birthdays,
        sms_sender,
    ));

    let probe = Arc::new(HttpDeliveryStatusProbe::new()?);
    let delivery_service = Arc::new(DeliveryStatusService::new(
        providers.clone(),
        sms_logs,
        probe,
    ));

    let balance_service = Arc::new(BalanceFetchService::new(providers)?);

    let _birthday_job = scheduler::start_birthday_job(&config.scheduler.birthday, birthday_service);
    let _delivery_job =
        scheduler::start_delivery_status_job(&config.scheduler.delivery_status, delivery_service);
    let _balance_job = scheduler::start_balance_job(&config.scheduler.balance, balance_service);

    info!("Shepherd scheduler started");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| InfrastructureError::General(format!("Failed to listen for shutdown: {e}")))?;
    info!("Shutting down");

    Ok(())
}
