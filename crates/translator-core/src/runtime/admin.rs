// crates/translator-core/src/runtime/admin.rs
// ============================================================================
// Module: Admin Service
// Description: Administrative listing, per-key editing, removal, and export.
// Purpose: Back the admin surface and the offline CLI commands.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Administrative operations sit beside the fetch and insert paths and use
//! the same store. Removal is symmetric to insert: a missing pair is
//! reported as [`TranslationError::NotFound`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::DEFAULT_LIST_LIMIT;
use crate::core::EntryFilter;
use crate::core::I18nSettings;
use crate::core::LocaleCode;
use crate::core::MAX_LIST_LIMIT;
use crate::core::TranslationEntry;
use crate::core::TranslationKey;
use crate::interfaces::TranslationStore;
use crate::runtime::error::TranslationError;
use crate::runtime::store::SharedTranslationStore;
use crate::runtime::validation::validate_key;
use crate::runtime::validation::validate_locale;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Administrative operations over a translation store.
#[derive(Clone)]
pub struct AdminService {
    /// Backing store.
    store: SharedTranslationStore,
    /// Locale settings (supported locales for the edit view).
    i18n: I18nSettings,
}

impl AdminService {
    /// Creates an admin service.
    #[must_use]
    pub const fn new(store: SharedTranslationStore, i18n: I18nSettings) -> Self {
        Self {
            store,
            i18n,
        }
    }

    /// Returns the injected locale settings.
    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.i18n
    }

    /// Lists one page of entries.
    ///
    /// A missing limit means [`DEFAULT_LIST_LIMIT`]; larger limits are capped
    /// at [`MAX_LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] for an empty locale filter and
    /// [`TranslationError::Persistence`] when the store fails.
    pub fn list(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, TranslationError> {
        if let Some(locale) = &filter.locale {
            validate_locale(locale)?;
        }
        let mut page = filter.clone();
        page.limit = Some(filter.limit.map_or(DEFAULT_LIST_LIMIT, |limit| limit.min(MAX_LIST_LIMIT)));
        Ok(self.store.list(&page)?)
    }

    /// Returns every locale's text for one key.
    ///
    /// Supported locales without a stored entry map to an empty string so an
    /// editor can show every configured locale.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] for an empty key and
    /// [`TranslationError::Persistence`] when the store fails.
    pub fn translations_for_key(
        &self,
        key: &TranslationKey,
    ) -> Result<BTreeMap<LocaleCode, String>, TranslationError> {
        validate_key(key)?;
        let filter = EntryFilter {
            key_prefix: Some(key.as_str().to_string()),
            ..EntryFilter::all()
        };
        let mut translations: BTreeMap<LocaleCode, String> = self
            .i18n
            .supported_locales
            .iter()
            .map(|locale| (locale.clone(), String::new()))
            .collect();
        for entry in self.store.list(&filter)? {
            if &entry.key == key {
                translations.insert(entry.locale, entry.text);
            }
        }
        Ok(translations)
    }

    /// Removes one entry.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::NotFound`] when no entry exists,
    /// [`TranslationError::Validation`] for empty input, and
    /// [`TranslationError::Persistence`] when the store fails.
    pub fn remove(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<(), TranslationError> {
        validate_key(key)?;
        validate_locale(locale)?;
        if self.store.remove(key, locale)? {
            tracing::debug!(key = %key, locale = %locale, "translation removed");
            Ok(())
        } else {
            Err(TranslationError::NotFound {
                key: key.clone(),
                locale: locale.clone(),
            })
        }
    }

    /// Returns every stored entry, ordered by `(key, locale)`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Persistence`] when the store fails.
    pub fn export(&self) -> Result<Vec<TranslationEntry>, TranslationError> {
        Ok(self.store.list(&EntryFilter::all())?)
    }
}
