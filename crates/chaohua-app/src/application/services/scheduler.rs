use chrono::{DateTime, Local, NaiveTime};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info, warn};

use chaohua_domain::shared::DomainError;

use super::CheckInService;

/// Next local time at `at` that is strictly after `now`
///
/// Returns `None` when the wall-clock time does not exist (or is ambiguous) on
/// both today and tomorrow, e.g. around a DST switch.
pub fn next_run_after(now: DateTime<Local>, at: NaiveTime) -> Option<DateTime<Local>> {
    let today = now.date_naive();
    [today, today.succ_opt()?]
        .into_iter()
        .filter_map(|day| day.and_time(at).and_local_timezone(now.timezone()).single())
        .find(|candidate| *candidate > now)
}

/// Runs the whole batch once a day at a fixed local time
pub struct AutoRunScheduler {
    service: Arc<CheckInService>,
    at: NaiveTime,
}

impl AutoRunScheduler {
    pub fn new(service: Arc<CheckInService>, at: NaiveTime) -> Self {
        Self { service, at }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        info!("➕ Daily auto check-in scheduled at {}", self.at.format("%H:%M"));

        tokio::spawn(async move {
            loop {
                let now = Local::now();
                let Some(next_run) = next_run_after(now, self.at) else {
                    error!(
                        "❌ Failed to calculate next run time for {}. Scheduler will exit.",
                        self.at.format("%H:%M")
                    );
                    break;
                };

                let duration_until_next =
                    (next_run - now).to_std().unwrap_or(Duration::from_secs(60));
                info!(
                    "Next auto check-in: {} (in {} seconds)",
                    next_run.format("%Y-%m-%d %H:%M:%S"),
                    duration_until_next.as_secs()
                );

                tokio::time::sleep(duration_until_next).await;

                info!(
                    "⏰ [AUTO CHECK-IN] Starting batch at {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S %Z")
                );
                self.run_once().await;
            }
        })
    }

    async fn run_once(&self) {
        match self.service.run_all().await {
            Ok(results) => {
                let succeeded = results.iter().filter(|r| r.result.success).count();
                info!(
                    "✅ [AUTO CHECK-IN] Finished: {}/{} account(s) completed",
                    succeeded,
                    results.len()
                );
            }
            Err(DomainError::AlreadyRunning(_)) => {
                warn!("⚠️ [AUTO CHECK-IN] Skipped, a batch is already running");
            }
            Err(DomainError::Validation(msg)) => {
                warn!("⚠️ [AUTO CHECK-IN] Skipped: {}", msg);
            }
            Err(e) => {
                error!("❌ [AUTO CHECK-IN] Failed: {}", e.format_with_code());
            }
        }
    }
}
