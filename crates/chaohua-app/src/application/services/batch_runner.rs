use anyhow::Context;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use chaohua_domain::check_in::{AccountRunResult, ChaohuaApi};
use chaohua_domain::credential::Credential;
use chaohua_infrastructure::config::{HttpConfig, PacingConfig};
use chaohua_infrastructure::http::WeiboHttpClient;

use super::CheckInClient;

/// Builds the upstream API for one credential
pub type ApiFactory =
    Arc<dyn Fn(&Credential) -> anyhow::Result<Arc<dyn ChaohuaApi>> + Send + Sync>;

/// Runs every credential sequentially, one account at a time
pub struct BatchRunner {
    pacing: PacingConfig,
    api_factory: ApiFactory,
}

impl BatchRunner {
    pub fn new(pacing: PacingConfig, http: HttpConfig) -> Self {
        let api_factory: ApiFactory = Arc::new(
            move |credential: &Credential| -> anyhow::Result<Arc<dyn ChaohuaApi>> {
                let client = WeiboHttpClient::new(credential, &http)?;
                Ok(Arc::new(client) as Arc<dyn ChaohuaApi>)
            },
        );
        Self::with_api_factory(pacing, api_factory)
    }

    pub fn with_api_factory(pacing: PacingConfig, api_factory: ApiFactory) -> Self {
        Self {
            pacing,
            api_factory,
        }
    }

    /// Run all cookies in list order
    ///
    /// Results come back in the same order, one per cookie. Per-account failures
    /// live inside each [`AccountRunResult`]; only a client that cannot be built
    /// fails the whole batch.
    #[instrument(skip_all, fields(batch_size = cookies.len(), run_id = %Uuid::new_v4()))]
    pub async fn run(&self, cookies: &[String]) -> anyhow::Result<Vec<AccountRunResult>> {
        let total = cookies.len();
        let mut results = Vec::with_capacity(total);

        for (i, raw) in cookies.iter().enumerate() {
            let account_index = i + 1;
            info!("Running account {}/{}", account_index, total);

            let credential = Credential::new(raw);
            let api = (self.api_factory)(&credential)
                .with_context(|| format!("failed to build client for account {}", account_index))?;

            let mut client = CheckInClient::new(
                credential,
                account_index,
                total,
                self.pacing.clone(),
                api,
            );
            let user_info = client.user_hint();
            let result = client.run().await;

            info!(
                "Account {} finished: success={}, total={}, ok={}, already={}, failed={}",
                account_index,
                result.success,
                result.total,
                result.success_count,
                result.already_signed_count,
                result.fail_count
            );

            results.push(AccountRunResult {
                account_index,
                user_info,
                result,
            });

            if account_index < total {
                tokio::time::sleep(self.pacing.account_interval).await;
            }
        }

        Ok(results)
    }
}
