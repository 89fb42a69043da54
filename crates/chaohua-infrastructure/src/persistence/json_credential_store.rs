use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::Mutex;

use chaohua_domain::credential::{CredentialList, CredentialStore};
use chaohua_domain::shared::DomainError;

/// Cookie list kept in a JSON file of the form `{"cookies": [...]}`
///
/// The file is created on first use and rewritten whole on every mutation.
/// Read-modify-write cycles are serialised by an async mutex.
pub struct JsonCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create the file with an empty list if it does not exist yet
    pub async fn init(&self) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        self.init_locked().await
    }

    async fn init_locked(&self) -> Result<(), DomainError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        if exists {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DomainError::Repository(e.to_string()))?;
            }
        }

        log::info!("Creating credential file at {}", self.path.display());
        self.save_locked(&CredentialList::default()).await
    }

    async fn load_locked(&self) -> Result<CredentialList, DomainError> {
        self.init_locked().await?;

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| {
            DomainError::Serialization(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Sibling file the new content is written to before it replaces the store
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn save_locked(&self, list: &CredentialList) -> Result<(), DomainError> {
        let mut content = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut content, formatter);
        list.serialize(&mut serializer)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        // The store file is only ever replaced whole
        let staging = self.staging_path();
        tokio::fs::write(&staging, content)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for JsonCredentialStore {
    async fn list(&self) -> Result<Vec<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.load_locked().await?.into_cookies())
    }

    async fn append(&self, cookie: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut list = self.load_locked().await?;
        list.append(cookie)?;
        self.save_locked(&list).await?;

        log::info!("Cookie added, {} stored", list.len());
        Ok(())
    }

    async fn remove_at(&self, index: usize) -> Result<String, DomainError> {
        let _guard = self.lock.lock().await;
        let mut list = self.load_locked().await?;
        let removed = list.remove_at(index)?;
        self.save_locked(&list).await?;

        log::info!("Cookie #{} removed, {} stored", index, list.len());
        Ok(removed)
    }
}
