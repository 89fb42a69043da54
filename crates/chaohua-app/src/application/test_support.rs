// Mock repositories and upstream API for testing

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use chaohua_domain::check_in::{
    ChaohuaApi, CheckInError, CheckinOutcome, Topic, TopicPage, ALREADY_CHECKED_IN_CODE,
};
use chaohua_domain::credential::{Credential, CredentialList, CredentialStore};
use chaohua_domain::shared::DomainError;
use chaohua_infrastructure::config::PacingConfig;

use super::services::{ApiFactory, BatchRunner, CheckInService};

pub(crate) struct InMemoryCredentialStore {
    list: tokio::sync::Mutex<CredentialList>,
}

impl InMemoryCredentialStore {
    pub(crate) fn new(cookies: &[&str]) -> Self {
        Self {
            list: tokio::sync::Mutex::new(CredentialList::new(
                cookies.iter().map(|c| c.to_string()).collect(),
            )),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn list(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.list.lock().await.cookies().to_vec())
    }

    async fn append(&self, cookie: &str) -> Result<(), DomainError> {
        self.list.lock().await.append(cookie)
    }

    async fn remove_at(&self, index: usize) -> Result<String, DomainError> {
        self.list.lock().await.remove_at(index)
    }
}

/// Upstream stand-in with scripted pages
///
/// Unscripted topics behave like the platform: the first check-in of the day
/// succeeds with 100000, repeats answer 382004.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    pages: HashMap<u32, Result<TopicPage, CheckInError>>,
    outcomes: HashMap<String, CheckinOutcome>,
    checked_today: Mutex<HashSet<String>>,
    page_calls: Mutex<Vec<u32>>,
    check_in_calls: Mutex<Vec<String>>,
    gate: Option<Arc<tokio::sync::Notify>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, page: u32, result: Result<TopicPage, CheckInError>) -> Self {
        self.pages.insert(page, result);
        self
    }

    pub(crate) fn with_outcome(mut self, topic_id: &str, outcome: CheckinOutcome) -> Self {
        self.outcomes.insert(topic_id.to_string(), outcome);
        self
    }

    /// Hold every page request until the gate is notified
    pub(crate) fn with_gate(mut self, gate: Arc<tokio::sync::Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }

    pub(crate) fn check_in_calls(&self) -> Vec<String> {
        self.check_in_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChaohuaApi for ScriptedApi {
    async fn fetch_topic_page(&self, page: u32) -> Result<TopicPage, CheckInError> {
        self.page_calls.lock().unwrap().push(page);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Err(CheckInError::Network(format!("no page {} scripted", page))))
    }

    async fn check_in(&self, topic: &Topic) -> CheckinOutcome {
        self.check_in_calls.lock().unwrap().push(topic.id.clone());
        if let Some(outcome) = self.outcomes.get(&topic.id) {
            return outcome.clone();
        }

        let first_today = self.checked_today.lock().unwrap().insert(topic.id.clone());
        if first_today {
            CheckinOutcome::from_response("100000", "签到成功")
        } else {
            CheckinOutcome::from_response(ALREADY_CHECKED_IN_CODE, "今天已签到")
        }
    }
}

/// Page with `(id, name)` topics; every item is a recognised topic
pub(crate) fn topic_page(topics: &[(&str, &str)], max_page: u32) -> TopicPage {
    TopicPage {
        topics: topics
            .iter()
            .map(|(id, name)| Topic::new(*id, *name))
            .collect(),
        item_count: topics.len(),
        max_page,
    }
}

/// Factory handing out the scripted API registered for each cookie
pub(crate) fn scripted_factory(apis: Vec<(&str, Arc<ScriptedApi>)>) -> ApiFactory {
    let apis: HashMap<String, Arc<ScriptedApi>> = apis
        .into_iter()
        .map(|(cookie, api)| (cookie.to_string(), api))
        .collect();

    Arc::new(move |credential: &Credential| -> anyhow::Result<Arc<dyn ChaohuaApi>> {
        let api = apis
            .get(credential.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no API scripted for {}", credential.as_str()))?;
        Ok(api as Arc<dyn ChaohuaApi>)
    })
}

pub(crate) fn service_with(
    cookies: &[&str],
    apis: Vec<(&str, Arc<ScriptedApi>)>,
) -> CheckInService {
    let store = Arc::new(InMemoryCredentialStore::new(cookies));
    let runner = BatchRunner::with_api_factory(PacingConfig::immediate(), scripted_factory(apis));
    CheckInService::new(store, runner)
}
