pub mod client;

pub use client::ApiClient;
pub use focusflow_api;
