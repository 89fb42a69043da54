use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

pub const MSG_EMPTY_COOKIE: &str = "Cookie不能为空！";
pub const MSG_DUPLICATE_COOKIE: &str = "该Cookie已存在！";
pub const MSG_INVALID_INDEX: &str = "无效的Cookie索引！";

/// Ordered list of stored cookies, persisted as `{"cookies": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialList {
    #[serde(default)]
    cookies: Vec<String>,
}

impl CredentialList {
    pub fn new(cookies: Vec<String>) -> Self {
        Self { cookies }
    }

    pub fn cookies(&self) -> &[String] {
        &self.cookies
    }

    pub fn into_cookies(self) -> Vec<String> {
        self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Append a cookie after trimming it. Empty input and exact duplicates are rejected.
    pub fn append(&mut self, cookie: &str) -> Result<(), DomainError> {
        let cookie = cookie.trim();
        if cookie.is_empty() {
            return Err(DomainError::Validation(MSG_EMPTY_COOKIE.to_string()));
        }

        if self.cookies.iter().any(|existing| existing == cookie) {
            return Err(DomainError::AlreadyExists(MSG_DUPLICATE_COOKIE.to_string()));
        }

        self.cookies.push(cookie.to_string());
        Ok(())
    }

    /// Remove the cookie at a 1-based position and return it.
    pub fn remove_at(&mut self, index: usize) -> Result<String, DomainError> {
        if index == 0 || index > self.cookies.len() {
            return Err(DomainError::NotFound(MSG_INVALID_INDEX.to_string()));
        }

        Ok(self.cookies.remove(index - 1))
    }
}
