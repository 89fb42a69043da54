use anyhow::Context;
use std::sync::Arc;

use chaohua_app::application::config::AppSettings;
use chaohua_app::application::services::{AutoRunScheduler, BatchRunner, CheckInService};
use chaohua_app::presentation::{serve, AppState};
use chaohua_infrastructure::logging::{init_console_logger, init_logger};
use chaohua_infrastructure::persistence::JsonCredentialStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::from_env_or_default();

    if let Err(e) = init_logger(&settings.log_dir) {
        init_console_logger();
        tracing::warn!(
            "File logging unavailable in {}: {:#}",
            settings.log_dir.display(),
            e
        );
    }
    for warning in &settings.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("🚀 Chaohua check-in starting...");

    let store = Arc::new(JsonCredentialStore::new(&settings.config_file));
    store
        .init()
        .await
        .with_context(|| format!("failed to initialise {}", settings.config_file.display()))?;
    tracing::info!("Cookie store: {}", settings.config_file.display());

    let runner = BatchRunner::new(settings.pacing.clone(), settings.http.clone());
    let service = Arc::new(CheckInService::new(store, runner));

    if let Some(at) = settings.auto_run_at {
        AutoRunScheduler::new(service.clone(), at).spawn();
    }

    serve(&settings, AppState::new(service)).await
}
