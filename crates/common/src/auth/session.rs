//! Session store
//!
//! Reads go straight to the backing store on every call, so a rotation
//! performed by one in-flight request is visible to the next reader without
//! any cache invalidation.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::types::CredentialPair;
use crate::storage::{CredentialStore, StoreResult};

/// Key holding the access credential
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key holding the refresh credential
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Key holding the JSON-encoded session identity
pub const IDENTITY_KEY: &str = "user";

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, IDENTITY_KEY];

/// Typed access to the stored credential pair and session identity.
///
/// Cheap to clone; clones share the same backing store.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn CredentialStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// The backing store.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Current access credential. Empty values count as absent.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn access_token(&self) -> StoreResult<Option<String>> {
        self.read_token(ACCESS_TOKEN_KEY)
    }

    /// Current refresh credential. Empty values count as absent.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn refresh_token(&self) -> StoreResult<Option<String>> {
        self.read_token(REFRESH_TOKEN_KEY)
    }

    /// Both credentials, or `None` unless both are present.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn credentials(&self) -> StoreResult<Option<CredentialPair>> {
        let access = self.access_token()?;
        let refresh = self.refresh_token()?;
        Ok(access.zip(refresh).map(|(access, refresh)| CredentialPair { access, refresh }))
    }

    /// Cached identity of the signed-in principal.
    ///
    /// A value that no longer deserializes is treated as absent.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn identity<T: DeserializeOwned>(&self) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(IDENTITY_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable session identity");
                Ok(None)
            }
        }
    }

    /// Replace the whole session with a freshly issued pair and identity.
    ///
    /// # Errors
    /// Returns an error if the identity cannot be serialized or the store
    /// rejects the write.
    pub fn store_session<T: Serialize>(
        &self,
        pair: &CredentialPair,
        identity: &T,
    ) -> StoreResult<()> {
        let identity = serde_json::to_string(identity)?;
        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, pair.access.as_str()),
            (REFRESH_TOKEN_KEY, pair.refresh.as_str()),
            (IDENTITY_KEY, identity.as_str()),
        ])?;

        info!("Session stored");
        Ok(())
    }

    /// Overwrite the access credential, and the refresh credential when the
    /// issuer rotated it, in a single write.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn rotate(&self, access: &str, refresh: Option<&str>) -> StoreResult<()> {
        match refresh {
            Some(refresh) => self
                .store
                .set_many(&[(ACCESS_TOKEN_KEY, access), (REFRESH_TOKEN_KEY, refresh)])?,
            None => self.store.set(ACCESS_TOKEN_KEY, access)?,
        }

        debug!(refresh_rotated = refresh.is_some(), "Session credentials rotated");
        Ok(())
    }

    /// Remove the credential pair and the identity.
    ///
    /// # Errors
    /// Returns an error if the store rejects the removal.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.clear(&SESSION_KEYS)?;
        info!("Session cleared");
        Ok(())
    }

    /// Whether an access credential is present.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn is_authenticated(&self) -> StoreResult<bool> {
        Ok(self.access_token()?.is_some())
    }

    fn read_token(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.store.get(key)?.filter(|value| !value.is_empty()))
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
