pub mod client;

pub use client::WeiboHttpClient;
