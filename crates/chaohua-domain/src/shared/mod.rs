use serde::{Deserialize, Serialize};

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    CredentialNotFound = 2001,

    // Business Logic (3xxx)
    CheckInAlreadyRunning = 3002,
    CredentialAlreadyExists = 3003,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::CheckInAlreadyRunning => ErrorSeverity::Warning,

            ErrorCode::CredentialNotFound
            | ErrorCode::CredentialAlreadyExists
            | ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::RepositoryError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Only a busy batch clears up by itself
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCode::CheckInAlreadyRunning)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Check-in already running: {0}")]
    AlreadyRunning(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::AlreadyExists(_) => ErrorCode::CredentialAlreadyExists,
            DomainError::NotFound(_) => ErrorCode::CredentialNotFound,
            DomainError::AlreadyRunning(_) => ErrorCode::CheckInAlreadyRunning,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
        }
    }

    /// Get error message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg)
            | DomainError::AlreadyExists(msg)
            | DomainError::NotFound(msg)
            | DomainError::AlreadyRunning(msg)
            | DomainError::Repository(msg)
            | DomainError::Serialization(msg)
            | DomainError::Infrastructure(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
