//! Credential store construction from configuration

use std::sync::Arc;

use blogc_common::storage::{CredentialStore, FileStore, KeychainStore, MemoryStore};
use blogc_common::SessionStore;
use blogc_domain::constants::DEFAULT_STORE_FILE;
use blogc_domain::{Result, StorageBackend, StorageConfig};
use tracing::info;

use crate::errors::InfraError;

/// Open the credential store selected by `config`.
///
/// The file backend defaults to `blogc-session.json` in the working
/// directory when no path is configured.
///
/// # Errors
/// Returns `BlogcError::Storage` if an existing session file cannot be read.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => {
            let path = config.path.as_deref().unwrap_or(DEFAULT_STORE_FILE);
            Arc::new(FileStore::open(path).map_err(InfraError::from)?)
        }
        StorageBackend::Keychain => Arc::new(KeychainStore::new(config.service_name.clone())),
    };

    info!(backend = ?config.backend, "Credential store opened");
    Ok(store)
}

/// [`open_store`] wrapped in a [`SessionStore`].
///
/// # Errors
/// Same as [`open_store`].
pub fn open_session(config: &StorageConfig) -> Result<SessionStore> {
    open_store(config).map(SessionStore::new)
}
