mod api;
mod error;
mod log;
mod value_objects;


pub use api::ChaohuaApi;
pub use error::CheckInError;
pub use log::{LogEntry, LogLevel, RunLog};
pub use value_objects::{
    AccountRunResult, CheckinOutcome, RunSummary, Topic, TopicPage, ALREADY_CHECKED_IN_CODE,
    SUCCESS_CODES,
};
