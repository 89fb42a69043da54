use async_trait::async_trait;

use crate::shared::DomainError;

/// Storage for the ordered cookie list
///
/// Implementations create an empty list on first use and rewrite the whole list on
/// every mutation. Add/remove rules are those of [`super::CredentialList`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// All stored cookies in insertion order
    async fn list(&self) -> Result<Vec<String>, DomainError>;

    /// Append a cookie (trimmed); fails on empty input or an exact duplicate
    async fn append(&self, cookie: &str) -> Result<(), DomainError>;

    /// Remove the cookie at a 1-based position, returning it
    async fn remove_at(&self, index: usize) -> Result<String, DomainError>;
}
