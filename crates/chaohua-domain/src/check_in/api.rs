use async_trait::async_trait;

use super::{CheckInError, CheckinOutcome, Topic, TopicPage};

/// Upstream topic-forum API, bound to one account's credential
#[async_trait]
pub trait ChaohuaApi: Send + Sync {
    /// Fetch one page (1-based) of the followed-topic list
    async fn fetch_topic_page(&self, page: u32) -> Result<TopicPage, CheckInError>;

    /// Check in to one topic. Never fails: every failure becomes a non-success outcome.
    async fn check_in(&self, topic: &Topic) -> CheckinOutcome;
}
