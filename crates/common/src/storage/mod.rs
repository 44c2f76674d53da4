//! Credential store capability
//!
//! A small key-value interface for values that must survive restarts of the
//! client (tokens, the cached session identity). Code that needs persistence
//! receives an `Arc<dyn CredentialStore>` instead of reaching for a global,
//! so tests can hand in a [`MemoryStore`].
//!
//! | backend            | durability            | atomic `set_many` |
//! |--------------------|-----------------------|-------------------|
//! | [`MemoryStore`]    | process lifetime      | yes               |
//! | [`FileStore`]      | file on disk          | yes               |
//! | `KeychainStore`    | platform keychain     | no                |

pub mod error;
pub mod file;
#[cfg(feature = "keychain")]
pub mod keychain;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
#[cfg(feature = "keychain")]
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

/// Synchronous key-value store for credentials.
///
/// Implementations must be safe to share between concurrently running
/// requests. Reads always observe the most recent completed write.
pub trait CredentialStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Insert or overwrite a single value.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Write several values together.
    ///
    /// The default writes one key at a time. Backends that can publish all
    /// entries at once override this so readers never see a partial update.
    ///
    /// # Errors
    /// Returns the first backend error; earlier entries may already be written
    /// when the default implementation is used.
    fn set_many(&self, entries: &[(&str, &str)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove the given keys. Absent keys are ignored.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the removal.
    fn clear(&self, keys: &[&str]) -> StoreResult<()>;
}
