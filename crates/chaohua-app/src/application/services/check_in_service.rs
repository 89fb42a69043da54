use std::sync::Arc;
use tokio::sync::Mutex;

use chaohua_domain::check_in::AccountRunResult;
use chaohua_domain::credential::{mask_cookie, CredentialStore};
use chaohua_domain::shared::DomainError;

use super::BatchRunner;
use crate::application::ResultExt;

pub const MSG_NO_COOKIES: &str = "暂无可用的Cookie，请先添加！";
pub const MSG_ALREADY_RUNNING: &str = "已有签到任务正在执行，请稍后再试！";

/// A stored cookie as shown in the management UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    /// 1-based position in the store
    pub index: usize,
    pub masked: String,
    pub raw: String,
}

/// Credential management and batch execution behind one lock
///
/// Only one batch runs at a time, whether started from the web UI or the
/// daily scheduler. A started batch runs on its own task and always finishes,
/// even if the caller stops waiting for it.
pub struct CheckInService {
    store: Arc<dyn CredentialStore>,
    runner: Arc<BatchRunner>,
    run_lock: Arc<Mutex<()>>,
}

impl CheckInService {
    pub fn new(store: Arc<dyn CredentialStore>, runner: BatchRunner) -> Self {
        Self {
            store,
            runner: Arc::new(runner),
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_cookies(&self) -> Result<Vec<StoredCookie>, DomainError> {
        let cookies = self.store.list().await?;
        Ok(cookies
            .into_iter()
            .enumerate()
            .map(|(i, raw)| StoredCookie {
                index: i + 1,
                masked: mask_cookie(&raw),
                raw,
            })
            .collect())
    }

    pub async fn add_cookie(&self, cookie: &str) -> Result<(), DomainError> {
        self.store.append(cookie).await?;
        log::info!("Cookie added");
        Ok(())
    }

    /// Remove the cookie at the 1-based `index`
    pub async fn delete_cookie(&self, index: usize) -> Result<(), DomainError> {
        self.store.remove_at(index).await?;
        log::info!("Cookie #{} deleted", index);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Run every stored cookie; overlapping calls are rejected
    ///
    /// Dropping the returned future does not cancel the batch: the run lock is
    /// held by the spawned task until the last account is done.
    pub async fn run_all(&self) -> Result<Vec<AccountRunResult>, DomainError> {
        let guard = self
            .run_lock
            .clone()
            .try_lock_owned()
            .map_err(|_| DomainError::AlreadyRunning(MSG_ALREADY_RUNNING.to_string()))?;

        let store = self.store.clone();
        let runner = self.runner.clone();
        let handle = tokio::spawn(async move {
            let _guard = guard;

            let cookies = store.list().await?;
            if cookies.is_empty() {
                return Err(DomainError::Validation(MSG_NO_COOKIES.to_string()));
            }

            log::info!("Starting check-in batch for {} account(s)", cookies.len());
            let results = runner.run(&cookies).await.to_infra_err()?;
            log::info!("Check-in batch finished");

            Ok(results)
        });

        handle.await.to_infra_err()?
    }
}
