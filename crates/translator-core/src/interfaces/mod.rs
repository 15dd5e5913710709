// crates/translator-core/src/interfaces/mod.rs
// ============================================================================
// Module: Translator Interfaces
// Description: Backend-agnostic interfaces for translation persistence.
// Purpose: Define the store contract shared by memory and SQLite backends.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The [`TranslationStore`] trait is the only seam between the services and
//! persistence. Implementations must be safe for concurrent use from
//! multiple requests; atomicity of a single upsert is the backend's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::EntryFilter;
use crate::core::LocaleCode;
use crate::core::TranslationEntry;
use crate::core::TranslationKey;

// ============================================================================
// SECTION: Translation Store
// ============================================================================

/// Translation store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("translation store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("translation store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("translation store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("translation store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("translation store error: {0}")]
    Store(String),
}

/// Persistent `(key, locale) -> text` mapping.
pub trait TranslationStore: Send + Sync {
    /// Looks up the text stored for a key in one locale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn get(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<Option<String>, StoreError>;

    /// Inserts the entry or replaces the text of an existing `(key, locale)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn upsert(&self, entry: &TranslationEntry) -> Result<(), StoreError>;

    /// Upserts several entries. Backends may apply them atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when any write fails.
    fn upsert_many(&self, entries: &[TranslationEntry]) -> Result<(), StoreError> {
        for entry in entries {
            self.upsert(entry)?;
        }
        Ok(())
    }

    /// Removes an entry. Returns `false` when no entry existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn remove(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<bool, StoreError>;

    /// Lists entries matching the filter, ordered by `(key, locale)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, StoreError>;
}
