// crates/translator-core/src/runtime/fetch.rs
// ============================================================================
// Module: Fetch Service
// Description: Read path with default-locale fallback.
// Purpose: Resolve translation keys for renderers and the public API.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! A key is looked up in the requested locale first, then in the configured
//! default locale. Keys missing from both are omitted from [`FetchService::fetch`]
//! results; they are never reported as errors. A store failure aborts the whole
//! fetch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::I18nSettings;
use crate::core::LocaleCode;
use crate::core::TranslationKey;
use crate::interfaces::TranslationStore;
use crate::runtime::error::TranslationError;
use crate::runtime::store::SharedTranslationStore;
use crate::runtime::validation::validate_key;
use crate::runtime::validation::validate_locale;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Text resolved for a single key, with the locale that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// Resolved text.
    pub text: String,
    /// Locale the text was found in (requested or default).
    pub locale: LocaleCode,
}

impl Resolved {
    /// Returns true when the text came from the default locale fallback.
    #[must_use]
    pub fn is_fallback(&self, requested: &LocaleCode) -> bool {
        &self.locale != requested
    }
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Read path over a translation store.
#[derive(Clone)]
pub struct FetchService {
    /// Backing store.
    store: SharedTranslationStore,
    /// Locale settings (default locale for fallback).
    i18n: I18nSettings,
}

impl FetchService {
    /// Creates a fetch service.
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

    /// Resolves a set of keys for one locale.
    ///
    /// Keys absent in both the requested and the default locale are left out
    /// of the returned map.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] for empty keys or locale and
    /// [`TranslationError::Persistence`] when the store fails.
    pub fn fetch(
        &self,
        keys: &BTreeSet<TranslationKey>,
        locale: &LocaleCode,
    ) -> Result<BTreeMap<TranslationKey, String>, TranslationError> {
        validate_locale(locale)?;
        for key in keys {
            validate_key(key)?;
        }
        let mut resolved = BTreeMap::new();
        for key in keys {
            if let Some(found) = self.lookup(key, locale)? {
                resolved.insert(key.clone(), found.text);
            }
        }
        Ok(resolved)
    }

    /// Resolves a single key, reporting which locale supplied the text.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::Validation`] for an empty key or locale and
    /// [`TranslationError::Persistence`] when the store fails.
    pub fn fetch_one(
        &self,
        key: &TranslationKey,
        locale: &LocaleCode,
    ) -> Result<Option<Resolved>, TranslationError> {
        validate_key(key)?;
        validate_locale(locale)?;
        self.lookup(key, locale)
    }

    /// Looks up the requested locale, then the default locale.
    fn lookup(
        &self,
        key: &TranslationKey,
        locale: &LocaleCode,
    ) -> Result<Option<Resolved>, TranslationError> {
        if let Some(text) = self.store.get(key, locale)? {
            return Ok(Some(Resolved {
                text,
                locale: locale.clone(),
            }));
        }
        let default_locale = &self.i18n.default_locale;
        if default_locale == locale {
            return Ok(None);
        }
        Ok(self.store.get(key, default_locale)?.map(|text| Resolved {
            text,
            locale: default_locale.clone(),
        }))
    }
}
