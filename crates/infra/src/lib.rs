//! # blogc Infrastructure
//!
//! Impure side of the blogc client.
//!
//! This crate contains:
//! - The HTTP transport
//! - The authenticated API client with single-flight credential refresh
//! - Auth and blog resource APIs built on that client
//! - Configuration loading and credential store construction
//!
//! ## Architecture
//! - Depends on `blogc-domain` for data and `blogc-common` for storage
//! - Contains all I/O (network, files, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, AuthApi, BlogApi};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use storage::{open_session, open_store};
