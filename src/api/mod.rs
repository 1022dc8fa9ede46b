mod admin;
mod brokers;
mod cache;
mod client;
mod comparison;
mod dashboard;
mod error;
mod favorites;
mod http;
mod inquiries;
mod listings;
mod messages;
mod retry;
mod traits;

pub use admin::ModerationAction;
pub use cache::ResponseCache;
pub use client::ApiClient;
pub use error::ApiError;
pub use favorites::FavoriteEntry;
pub use http::ReqwestTransport;
pub use retry::RetryPolicy;
pub use traits::{ApiRequest, ApiResponse, Transport};

#[cfg(test)]
pub(crate) use client::testing;
