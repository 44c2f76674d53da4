//! Session credentials
//!
//! Typed access to the credential pair and the cached session identity,
//! layered on top of an injected [`CredentialStore`](crate::storage::CredentialStore).
//!
//! ```text
//! ┌─────────────────┐
//! │  SessionStore   │  access/refresh pair + identity, atomic rotation
//! └────────┬────────┘
//!          │
//!          └──► dyn CredentialStore   (memory | file | keychain)
//! ```
//!
//! # Usage Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use blogc_common::auth::{CredentialPair, SessionStore};
//! use blogc_common::storage::MemoryStore;
//!
//! let session = SessionStore::new(Arc::new(MemoryStore::new()));
//! session.store_session(&CredentialPair::new("A1", "R1"), &"ada")?;
//! assert_eq!(session.access_token()?.as_deref(), Some("A1"));
//!
//! session.rotate("A2", None)?;
//! assert_eq!(session.refresh_token()?.as_deref(), Some("R1"));
//!
//! session.clear()?;
//! assert!(!session.is_authenticated()?);
//! # Ok::<(), blogc_common::storage::StoreError>(())
//! ```

pub mod session;
pub mod types;

pub use session::{SessionStore, ACCESS_TOKEN_KEY, IDENTITY_KEY, REFRESH_TOKEN_KEY};
pub use types::CredentialPair;
