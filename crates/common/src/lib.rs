//! Platform plumbing shared across blogc crates.
//!
//! # Modules
//!
//! - `storage`: the injected credential-store capability and its backends
//!   (memory, file, platform keychain)
//! - `auth`: the typed session store layered over a credential store
//!
//! # Feature Tiers
//!
//! - `keychain`: enables [`storage::KeychainStore`] through the `keyring`
//!   crate

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod storage;

// Re-export commonly used types and traits for convenience
pub use auth::{CredentialPair, SessionStore};
#[cfg(feature = "keychain")]
pub use storage::KeychainStore;
pub use storage::{CredentialStore, FileStore, MemoryStore, StoreError, StoreResult};
