//! Persisted key/value storage for the credential token and the serialized user. Writes are
//! synchronous and serialized by the backend's lock.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use common::error::{PortalError, PortalResult};

/// Local storage backend used by the session and the HTTP client
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any
    /// # Errors
    /// This function will return an error if the backend cannot be read
    fn get(&self, key: &str) -> PortalResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value
    /// # Errors
    /// This function will return an error if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> PortalResult<()>;
    /// Delete `key`, returning the value that was removed
    /// # Errors
    /// This function will return an error if the backend cannot be written
    fn remove(&self, key: &str) -> PortalResult<Option<String>>;
}

/// Acquire `mutex`, treating poisoning as an unavailable backend
fn lock<T>(mutex: &Mutex<T>) -> PortalResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| PortalError::StorageUnavailable("storage lock was poisoned"))
}

/// Process local storage. Nothing survives a restart.
#[derive(Default, Debug)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage seeded with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored keys
    /// # Errors
    /// This function will return an error if the storage lock was poisoned
    pub fn len(&self) -> PortalResult<usize> {
        Ok(lock(&self.entries)?.len())
    }

    /// True when no key is stored
    /// # Errors
    /// This function will return an error if the storage lock was poisoned
    pub fn is_empty(&self) -> PortalResult<bool> {
        Ok(lock(&self.entries)?.is_empty())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        lock(&self.entries)?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(lock(&self.entries)?.remove(key))
    }
}

/// Storage backed by a single JSON object on disk. The whole file is rewritten on every change
/// through a sibling temp file so a crash never leaves a half written document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`. A missing file is an empty storage and is only created on
    /// the first write.
    /// # Errors
    /// This function will return an error if the file exists but cannot be read or is not a JSON
    /// object of strings
    pub fn open<P: AsRef<Path>>(path: P) -> PortalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            HashMap::new()
        };
        log::debug!("Opened storage file {:?} with {} entries", path, entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk
    fn flush(&self, entries: &HashMap<String, String>) -> PortalResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.path.with_extension("tmp");
        fs::write(&temp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        let mut entries = lock(&self.entries)?;
        let previous = entries.insert(key.to_owned(), value.to_owned());
        if let Err(error) = self.flush(&entries) {
            match previous {
                Some(previous) => entries.insert(key.to_owned(), previous),
                None => entries.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> PortalResult<Option<String>> {
        let mut entries = lock(&self.entries)?;
        let Some(removed) = entries.remove(key) else {
            return Ok(None);
        };
        if let Err(error) = self.flush(&entries) {
            entries.insert(key.to_owned(), removed);
            return Err(error);
        }
        Ok(Some(removed))
    }
}
