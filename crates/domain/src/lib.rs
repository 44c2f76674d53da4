//! # blogc Domain
//!
//! Data types shared by the blogc client crates.
//!
//! This crate contains:
//! - The workspace error type and `Result` alias
//! - Configuration structures
//! - Payload types exchanged with the blog API (users, posts, comments)
//! - Endpoint and storage-key constants
//! - Media URL helpers
//!
//! ## Architecture
//! - No dependencies on other blogc crates
//! - No I/O: everything here is plain data and pure functions

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::media;
