use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::errors::CoreError;
use crate::models::history::{HistorySample, PortfolioState};
use crate::models::holding::Holding;

use super::keys::StorageKey;
use super::store::Store;

/// Read/write access to exactly one record type under exactly one key.
///
/// Services receive a repository instead of the raw `Store`, so a service
/// can only ever touch the record it owns.
pub struct Repository<T> {
    store: Store,
    key: StorageKey,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("key", &self.key).finish()
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> {
    pub fn new(store: Store, key: StorageKey) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    /// Load the record, or `default` if absent/unreadable.
    pub fn load_or(&self, default: T) -> T {
        self.store.get(self.key, default)
    }

    pub fn save(&self, value: &T) {
        self.store.set(self.key, value);
    }

    /// Save, reporting failure to the caller instead of logging it.
    pub fn try_save(&self, value: &T) -> Result<(), CoreError> {
        self.store.try_set(self.key, value)
    }

    pub fn clear(&self) {
        self.store.remove(self.key);
    }
}

impl<T: Serialize + DeserializeOwned + Default> Repository<T> {
    /// Load the record, or `T::default()` if absent/unreadable.
    pub fn load(&self) -> T {
        self.store.get_or_default(self.key)
    }

    /// Load, modify, save.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut value = self.load();
        let result = f(&mut value);
        self.save(&value);
        result
    }

    /// Load, modify, and save only if the modification succeeds.
    /// On error the stored record is left untouched.
    pub fn try_update<R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut value = self.load();
        let result = f(&mut value)?;
        self.save(&value);
        Ok(result)
    }
}

// ── Portfolio state ─────────────────────────────────────────────────

/// Shapes a portfolio key may hold on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPortfolio {
    /// Bare holdings array, with history kept under a separate key.
    Legacy(Vec<Holding>),
    Combined(PortfolioState),
}

/// Holdings and history of one portfolio, read and written as one value.
///
/// When `legacy_history` is set, a bare holdings array found under the
/// primary key is combined with the samples stored under the legacy key.
/// The next save writes the combined layout and drops the legacy key.
#[derive(Debug, Clone)]
pub struct PortfolioRepository {
    store: Store,
    key: StorageKey,
    legacy_history: Option<StorageKey>,
}

impl PortfolioRepository {
    pub fn new(store: Store, key: StorageKey) -> Self {
        Self {
            store,
            key,
            legacy_history: None,
        }
    }

    pub fn with_legacy_history(mut self, key: StorageKey) -> Self {
        self.legacy_history = Some(key);
        self
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    pub fn load(&self) -> PortfolioState {
        match self.store.get::<Option<StoredPortfolio>>(self.key, None) {
            Some(StoredPortfolio::Combined(state)) => state,
            Some(StoredPortfolio::Legacy(holdings)) => {
                let mut history: Vec<HistorySample> = match self.legacy_history {
                    Some(key) => self.store.get_or_default(key),
                    None => Vec::new(),
                };
                history.sort_by_key(|s| s.timestamp);
                log::info!(
                    "Read legacy {} layout ({} holdings, {} samples)",
                    self.key,
                    holdings.len(),
                    history.len()
                );
                PortfolioState { holdings, history }
            }
            None => PortfolioState::default(),
        }
    }

    /// Persist holdings and history in a single write.
    pub fn save(&self, state: &PortfolioState) {
        if let Err(e) = self.store.try_set(self.key, state) {
            log::error!("Error saving {}: {e}", self.key);
            return;
        }
        if let Some(legacy) = self.legacy_history {
            if self.store.contains(legacy) {
                self.store.remove(legacy);
            }
        }
    }

    /// Load, modify, and save in one write.
    pub fn update<R>(&self, f: impl FnOnce(&mut PortfolioState) -> R) -> R {
        let mut state = self.load();
        let result = f(&mut state);
        self.save(&state);
        result
    }
}
