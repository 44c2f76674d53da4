//! Remote blog API
//!
//! [`ApiClient`] is the authenticated transport every resource API goes
//! through. It attaches the stored bearer credential, skips excluded
//! endpoints and recovers once from an expired credential through a
//! single-flight refresh.
//!
//! # Architecture
//!
//! - `client`: URL resolution, credential attachment, 401 recovery
//! - `refresh`: refresh exchange and the coordinator that deduplicates it
//! - `exclusion`: endpoints that never carry a credential
//! - `auth`, `blog`: typed callers of the client

pub mod auth;
pub mod blog;
pub mod client;
pub mod errors;
pub mod exclusion;
pub mod refresh;
pub mod request;
pub mod response;

pub use auth::AuthApi;
pub use blog::BlogApi;
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{ApiError, ApiErrorCategory};
pub use exclusion::AuthExclusions;
pub use refresh::{RefreshFailure, RefreshOutcome};
pub use request::{ApiRequest, Attempt, MultipartForm, RequestBody};
pub use response::ApiResponse;
