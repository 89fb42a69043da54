mod batch_runner;
mod check_in_client;
mod check_in_service;
mod scheduler;

pub use batch_runner::{ApiFactory, BatchRunner};
pub use check_in_client::CheckInClient;
pub use check_in_service::{CheckInService, StoredCookie, MSG_ALREADY_RUNNING, MSG_NO_COOKIES};
pub use scheduler::{next_run_after, AutoRunScheduler};
