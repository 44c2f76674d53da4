//! Platform keychain credential store
//!
//! Thin wrapper over the `keyring` crate: each key becomes one entry under
//! the configured service name (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service).
//!
//! Entries are written one at a time, so `set_many` is not atomic here.
//!
//! The platform backends are selected through `keyring` features
//! (`apple-native`, `windows-native`, `linux-native`). Without them `keyring`
//! falls back to a per-entry mock that forgets every write.

use keyring::Entry;
use tracing::debug;

use super::{CredentialStore, StoreError, StoreResult};

/// Credential store backed by the platform keychain.
#[derive(Debug, Clone)]
pub struct KeychainStore {
    service_name: String,
}

impl KeychainStore {
    /// Create a store for a specific service
    ///
    /// # Examples
    /// ```
    /// use blogc_common::storage::KeychainStore;
    ///
    /// let store = KeychainStore::new("blogc.session");
    /// assert_eq!(store.service_name(), "blogc.session");
    /// ```
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> StoreResult<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| {
            StoreError::Backend(format!("Failed to open keychain entry {key}: {e}"))
        })
    }
}

impl CredentialStore for KeychainStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Backend(format!("Failed to retrieve secret for {key}: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        self.entry(key)?
            .set_password(value)
            .map_err(|e| StoreError::Backend(format!("Failed to store secret for {key}: {e}")))
    }

    fn clear(&self, keys: &[&str]) -> StoreResult<()> {
        for key in keys {
            debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => {
                    return Err(StoreError::Backend(format!(
                        "Failed to delete secret for {key}: {e}"
                    )));
                }
            }
        }
        Ok(())
    }
}
