//! Durable client-side key-value storage.
//!
//! The storefront persists exactly two slots between runs: the auth token and
//! the serialized guest cart. The [`KeyValueStore`] trait is the seam that
//! lets the cart and session logic run against a real file-backed store in
//! the shells and an in-memory store in tests.
//!
//! Reads are deliberately lenient: a missing or unreadable value degrades to
//! `None` with a warning, never an error, so corrupt state can only ever cost
//! the user a cart or a session, not a crash.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Auth token slot.
    pub const TOKEN: &str = "token";
    /// Serialized guest cart slot (JSON array of line items).
    pub const LOCAL_CART: &str = "local_cart";
}

/// Errors from durable storage writes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string key-value storage.
///
/// Writes are synchronous relative to the mutating call; there is no
/// write-behind buffering.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing or unreadable values yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, creating the slot if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the value cannot be flushed.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if an existing value cannot be removed.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a data directory.
///
/// The directory is created lazily on first write, so a read-only run never
/// touches the filesystem.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, treating as absent");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            key: key.to_owned(),
            source,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_owned(),
            source,
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get(keys::TOKEN).is_none());

        store.put(keys::TOKEN, "abc").expect("put");
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc"));

        store.delete(keys::TOKEN).expect("delete");
        assert!(store.get(keys::TOKEN).is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("state"));

        assert!(store.get(keys::LOCAL_CART).is_none());
        store.put(keys::LOCAL_CART, "[]").expect("put");
        assert_eq!(store.get(keys::LOCAL_CART).as_deref(), Some("[]"));

        store.delete(keys::LOCAL_CART).expect("delete");
        assert!(store.get(keys::LOCAL_CART).is_none());
    }

    #[test]
    fn test_file_store_delete_missing_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        store.delete("nothing-here").expect("delete missing");
    }

    #[test]
    fn test_file_store_read_does_not_create_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("never-created");
        let store = FileStore::new(&nested);
        assert!(store.get(keys::TOKEN).is_none());
        assert!(!nested.exists());
    }
}
