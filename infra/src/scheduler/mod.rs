//! Recurring job triggers
//!
//! Three independent timer tasks: the daily birthday check, the
//! half-hourly delivery status poll, and the six-hourly balance refresh.
//! Each owns its own schedule and enable flag, invokes one idempotent
//! engine call, and catches every error at the task boundary so a failed
//! run never takes the process down or blocks the next fire.

use chrono::Utc;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shepherd_core::repositories::{
    BirthdayRepository, MemberRepository, ProviderRepository, SmsLogRepository,
};
use shepherd_core::services::birthday::BirthdayService;
use shepherd_core::services::sms_sender::SmsSender;
use shepherd_shared::config::schedule::{
    JobConfig, DEFAULT_BALANCE_SCHEDULE, DEFAULT_BIRTHDAY_SCHEDULE,
    DEFAULT_DELIVERY_STATUS_SCHEDULE,
};

use crate::balance::BalanceFetchService;
use crate::delivery_status::{DeliveryStatusProbe, DeliveryStatusService};

/// Parse a schedule expression, falling back to the job's default when the
/// configured value is invalid.
pub(crate) fn resolve_schedule(expr: &str, fallback: &str) -> Option<Schedule> {
    match Schedule::from_str(expr) {
        Ok(schedule) => Some(schedule),
        Err(err) => {
            warn!(expr = %expr, error = %err, fallback = %fallback, "Invalid cron schedule, using default");
            match Schedule::from_str(fallback) {
                Ok(schedule) => Some(schedule),
                Err(err) => {
                    error!(fallback = %fallback, error = %err, "Default cron schedule failed to parse");
                    None
                }
            }
        }
    }
}

/// Sleep until the schedule's next fire time.
///
/// Returns false when the schedule yields no future fire (a schedule that
/// has run out), which stops the job loop.
async fn wait_for_next_fire(schedule: &Schedule) -> bool {
    let next = match schedule.upcoming(Utc).next() {
        Some(next) => next,
        None => return false,
    };
    let until = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
    tokio::time::sleep(until).await;
    true
}

fn spawn_job<F, Fut>(name: &'static str, schedule: Schedule, run: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        loop {
            if !wait_for_next_fire(&schedule).await {
                warn!(job = name, "Schedule has no upcoming fire time, stopping job");
                break;
            }
            info!(job = name, "Starting scheduled run");
            run().await;
        }
    })
}

/// Start the daily birthday check job.
///
/// Returns `None` when the job is disabled via configuration.
pub fn start_birthday_job<M, P, B, S>(
    config: &JobConfig,
    service: Arc<BirthdayService<M, P, B, S>>,
) -> Option<JoinHandle<()>>
where
    M: MemberRepository + 'static,
    P: ProviderRepository + 'static,
    B: BirthdayRepository + 'static,
    S: SmsSender + 'static,
{
    if !config.enabled {
        info!("Birthday job is disabled");
        return None;
    }
    let schedule = resolve_schedule(&config.schedule, DEFAULT_BIRTHDAY_SCHEDULE)?;
    info!(schedule = %config.schedule, "Birthday job initialized");

    Some(spawn_job("birthday_check", schedule, move || {
        let service = service.clone();
        async move {
            match service.check_and_send_birthday_messages().await {
                Ok(result) => {
                    info!(
                        sent = result.sent,
                        skipped = result.skipped,
                        failed = result.failed,
                        "Birthday check complete"
                    );
                    if !result.details.sent.is_empty() {
                        info!(members = %result.details.sent.join(", "), "Birthday messages sent");
                    }
                    if !result.details.skipped.is_empty() {
                        info!(members = %result.details.skipped.join(", "), "Birthday messages skipped (already sent)");
                    }
                    for failure in &result.details.failed {
                        error!(member = %failure.name, error = %failure.error, "Birthday message failed");
                    }
                    if let Some(message) = result.message {
                        info!("{message}");
                    }
                }
                Err(err) => error!(error = %err, "Birthday check failed"),
            }
        }
    }))
}

/// Start the delivery status polling job.
///
/// Returns `None` when the job is disabled via configuration.
pub fn start_delivery_status_job<P, L, C>(
    config: &JobConfig,
    service: Arc<DeliveryStatusService<P, L, C>>,
) -> Option<JoinHandle<()>>
where
    P: ProviderRepository + 'static,
    L: SmsLogRepository + 'static,
    C: DeliveryStatusProbe + 'static,
{
    if !config.enabled {
        info!("Delivery status job is disabled");
        return None;
    }
    let schedule = resolve_schedule(&config.schedule, DEFAULT_DELIVERY_STATUS_SCHEDULE)?;
    info!(schedule = %config.schedule, "Delivery status job initialized");

    Some(spawn_job("delivery_status", schedule, move || {
        let service = service.clone();
        async move {
            match service.check_pending_messages().await {
                Ok(summary) => info!(
                    checked = summary.checked,
                    updated = summary.updated,
                    errors = summary.errors,
                    "Delivery status check complete"
                ),
                Err(err) => error!(error = %err, "Delivery status check failed"),
            }
        }
    }))
}

/// Start the balance refresh job.
///
/// Returns `None` when the job is disabled via configuration.
pub fn start_balance_job<P>(
    config: &JobConfig,
    service: Arc<BalanceFetchService<P>>,
) -> Option<JoinHandle<()>>
where
    P: ProviderRepository + 'static,
{
    if !config.enabled {
        info!("Balance refresh job is disabled");
        return None;
    }
    let schedule = resolve_schedule(&config.schedule, DEFAULT_BALANCE_SCHEDULE)?;
    info!(schedule = %config.schedule, "Balance refresh job initialized");

    Some(spawn_job("balance_refresh", schedule, move || {
        let service = service.clone();
        async move {
            match service.fetch_all_provider_balances().await {
                Ok(summary) => info!(
                    total = summary.total,
                    successful = summary.successful,
                    failed = summary.failed,
                    "Balance refresh complete"
                ),
                Err(err) => error!(error = %err, "Balance refresh failed"),
            }
        }
    }))
}
