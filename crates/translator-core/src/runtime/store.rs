// crates/translator-core/src/runtime/store.rs
// ============================================================================
// Module: Translator In-Memory Store
// Description: In-memory translation store and shared store wrapper.
// Purpose: Provide a deterministic store without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryTranslationStore`] keeps entries in an ordered map and is used by
//! tests and the `memory` store type. [`SharedTranslationStore`] erases the
//! backend type so services can be built over any store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::EntryFilter;
use crate::core::LocaleCode;
use crate::core::TranslationEntry;
use crate::core::TranslationKey;
use crate::interfaces::StoreError;
use crate::interfaces::TranslationStore;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Map key: `(translation key, locale)`.
type EntryKey = (String, String);

/// In-memory translation store for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTranslationStore {
    /// Entries protected by a mutex, ordered by `(key, locale)`.
    entries: Arc<Mutex<BTreeMap<EntryKey, String>>>,
}

impl InMemoryTranslationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    /// Returns true when no entries are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    /// Locks the entry map.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<EntryKey, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Store("translation store mutex poisoned".to_string()))
    }
}

impl TranslationStore for InMemoryTranslationStore {
    fn get(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<Option<String>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(&entry_key(key, locale)).cloned())
    }

    fn upsert(&self, entry: &TranslationEntry) -> Result<(), StoreError> {
        self.lock()?.insert(entry_key(&entry.key, &entry.locale), entry.text.clone());
        Ok(())
    }

    fn upsert_many(&self, entries: &[TranslationEntry]) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        for entry in entries {
            guard.insert(entry_key(&entry.key, &entry.locale), entry.text.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(&entry_key(key, locale)).is_some())
    }

    fn list(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, StoreError> {
        let guard = self.lock()?;
        let matching = guard
            .iter()
            .map(|((key, locale), text)| TranslationEntry::new(key.as_str(), locale.as_str(), text))
            .filter(|entry| filter.matches(entry))
            .skip(filter.offset);
        let entries = match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };
        drop(guard);
        Ok(entries)
    }
}

/// Builds the map key for a `(key, locale)` pair.
fn entry_key(key: &TranslationKey, locale: &LocaleCode) -> EntryKey {
    (key.as_str().to_string(), locale.as_str().to_string())
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Shared translation store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedTranslationStore {
    /// Inner store implementation.
    inner: Arc<dyn TranslationStore>,
}

impl SharedTranslationStore {
    /// Wraps a translation store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl TranslationStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl TranslationStore for SharedTranslationStore {
    fn get(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<Option<String>, StoreError> {
        self.inner.get(key, locale)
    }

    fn upsert(&self, entry: &TranslationEntry) -> Result<(), StoreError> {
        self.inner.upsert(entry)
    }

    fn upsert_many(&self, entries: &[TranslationEntry]) -> Result<(), StoreError> {
        self.inner.upsert_many(entries)
    }

    fn remove(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<bool, StoreError> {
        self.inner.remove(key, locale)
    }

    fn list(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, StoreError> {
        self.inner.list(filter)
    }
}
