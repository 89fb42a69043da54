mod timeouts;

pub use timeouts::{HttpConfig, PacingConfig, DEFAULT_BASE_URL};
