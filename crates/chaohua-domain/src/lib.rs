// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod check_in;
pub mod credential;
pub mod shared;

// Re-exports for convenience
pub use shared::{DomainError, ErrorCode, ErrorSeverity};
