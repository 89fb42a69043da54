pub mod dto;
pub mod routes;
pub mod server;

pub use routes::router;
pub use server::{serve, AppState};
