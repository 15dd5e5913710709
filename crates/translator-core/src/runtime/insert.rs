// crates/translator-core/src/runtime/insert.rs
// ============================================================================
// Module: Insert Service
// Description: Write path for translation entries.
// Purpose: Validate and upsert single entries, per-key saves, and imports.
// Dependencies: crate::core, crate::interfaces, serde
// ============================================================================

//! ## Overview
//! Every write validates its whole input before touching the store, so a
//! rejected request never leaves a partial mutation behind. Writes are
//! last-write-wins with no history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::I18nSettings;
use crate::core::LocaleCode;
use crate::core::TranslationEntry;
use crate::core::TranslationKey;
use crate::interfaces::TranslationStore;
use crate::runtime::error::TranslationError;
use crate::runtime::store::SharedTranslationStore;
use crate::runtime::validation::validate_entry;
use crate::runtime::validation::validate_key;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Summary of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Number of entries written.
    pub imported: usize,
    /// Distinct keys touched.
    pub keys: usize,
    /// Distinct locales touched.
    pub locales: BTreeSet<LocaleCode>,
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Write path over a translation store.
#[derive(Clone)]
pub struct InsertService {
    /// Backing store.
    store: SharedTranslationStore,
    /// Locale settings (strict locale policy).
    i18n: I18nSettings,
}

impl InsertService {
    /// Creates an insert service.
    #[must_use]
    pub const fn new(store: SharedTranslationStore, i18n: I18nSettings) -> Self {
        Self {
            store,
            i18n,
        }
    }

    /// Upserts one entry, replacing any prior text for the same pair.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] for an empty key or locale
    /// (the store is not touched) and [`TranslationError::Persistence`] when
    /// the store fails.
    pub fn insert(
        &self,
        key: &TranslationKey,
        locale: &LocaleCode,
        text: &str,
    ) -> Result<(), TranslationError> {
        let entry = TranslationEntry {
            key: key.clone(),
            locale: locale.clone(),
            text: text.to_string(),
        };
        validate_entry(&entry, &self.i18n)?;
        self.store.upsert(&entry)?;
        tracing::debug!(key = %entry.key, locale = %entry.locale, "translation saved");
        Ok(())
    }

    /// Saves several locales of one key (the admin "save" action).
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] when any locale or text is
    /// invalid and [`TranslationError::Persistence`] when the store fails.
    pub fn save_key(
        &self,
        key: &TranslationKey,
        translations: &BTreeMap<LocaleCode, String>,
    ) -> Result<usize, TranslationError> {
        validate_key(key)?;
        let entries: Vec<TranslationEntry> = translations
            .iter()
            .map(|(locale, text)| TranslationEntry {
                key: key.clone(),
                locale: locale.clone(),
                text: text.clone(),
            })
            .collect();
        self.write_all(&entries)?;
        Ok(entries.len())
    }

    /// Imports a batch of entries. Later duplicates of a pair win.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] when any entry is invalid (no
    /// entry is written) and [`TranslationError::Persistence`] when the store
    /// fails.
    pub fn import(&self, entries: &[TranslationEntry]) -> Result<ImportReport, TranslationError> {
        self.write_all(entries)?;
        let keys: BTreeSet<&TranslationKey> = entries.iter().map(|entry| &entry.key).collect();
        let report = ImportReport {
            imported: entries.len(),
            keys: keys.len(),
            locales: entries.iter().map(|entry| entry.locale.clone()).collect(),
        };
        tracing::info!(imported = report.imported, keys = report.keys, "translations imported");
        Ok(report)
    }

    /// Validates every entry, then writes them in one batch.
    fn write_all(&self, entries: &[TranslationEntry]) -> Result<(), TranslationError> {
        for entry in entries {
            validate_entry(entry, &self.i18n)?;
        }
        if entries.is_empty() {
            return Ok(());
        }
        self.store.upsert_many(entries)?;
        Ok(())
    }
}
