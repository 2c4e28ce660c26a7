use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::errors::CoreError;

use super::backend::{KeyValueBackend, MemoryBackend};
use super::format;
use super::keys::StorageKey;

/// Typed access to persisted records.
///
/// `get` and `set` never fail: read problems (absent key, unavailable
/// storage, corrupt data) yield the caller's default, and write problems
/// are logged and dropped. `try_get`/`try_set` expose the underlying error
/// for callers that need to tell the cases apart.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueBackend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// A store backed by a fresh in-memory map.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// A store backed by JSON files in `dir` (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_dir(dir: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let backend = super::backend::FileBackend::open(dir)?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Read and decode the value under `key`.
    /// `Ok(None)` means the key was never set.
    pub fn try_get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, CoreError> {
        match self.backend.read(key.as_str())? {
            Some(raw) => format::decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Read the value under `key`, or `default` if it is absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(CoreError::UnsupportedVersion(v)) => {
                log::warn!("Ignoring {key}: written by a newer version (record version {v})");
                default
            }
            Err(e) => {
                log::error!("Error reading {key} from {} storage: {e}", self.backend.name());
                default
            }
        }
    }

    /// Like `get`, with `T::default()` as the fallback.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: StorageKey) -> T {
        self.get(key, T::default())
    }

    /// Encode and persist `value` under `key`.
    pub fn try_set<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), CoreError> {
        let raw = format::encode(value)?;
        self.backend.write(key.as_str(), &raw)
    }

    /// Persist `value` under `key`; failures are logged, not returned.
    pub fn set<T: Serialize>(&self, key: StorageKey, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            log::error!("Error saving {key} to {} storage: {e}", self.backend.name());
        }
    }

    /// Delete the value under `key`; failures are logged.
    pub fn remove(&self, key: StorageKey) {
        if let Err(e) = self.backend.remove(key.as_str()) {
            log::error!("Error removing {key} from {} storage: {e}", self.backend.name());
        }
    }

    /// Whether anything is stored under `key`.
    pub fn contains(&self, key: StorageKey) -> bool {
        matches!(self.backend.read(key.as_str()), Ok(Some(_)))
    }
}
