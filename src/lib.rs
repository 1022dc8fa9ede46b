//! Client for the Bari property marketplace backend.
//!
//! The [`search`] module holds the search page flow: URL-backed filters, a staged filter panel
//! and the listings query. [`api`] talks to the backend, and [`auth`] keeps the session's tokens
//! fresh.

pub mod api;
pub mod auth;
pub mod config;
pub mod favorites;
pub mod format;
pub mod models;
pub mod search;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionManager, SessionStatus};
pub use config::Config;
