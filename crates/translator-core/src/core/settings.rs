// crates/translator-core/src/core/settings.rs
// ============================================================================
// Module: Locale Settings
// Description: Default and supported locale settings injected into services.
// Purpose: Replace process-wide i18n state with an explicit value.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`I18nSettings`] is built once at startup (usually from the `[i18n]`
//! config section) and handed to every service. Nothing reads locale
//! settings from global state.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::LocaleCode;

/// Locale settings for fetch fallback and insert validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nSettings {
    /// Locale used when a translation is missing in the requested locale.
    pub default_locale: LocaleCode,
    /// Locales offered to administrators.
    pub supported_locales: BTreeSet<LocaleCode>,
    /// Reject inserts for locales outside `supported_locales`.
    pub strict_locales: bool,
}

impl I18nSettings {
    /// Builds settings with a single supported locale and lenient inserts.
    #[must_use]
    pub fn with_default(default_locale: impl Into<LocaleCode>) -> Self {
        let default_locale = default_locale.into();
        let mut supported_locales = BTreeSet::new();
        supported_locales.insert(default_locale.clone());
        Self {
            default_locale,
            supported_locales,
            strict_locales: false,
        }
    }

    /// Returns true when the locale is listed as supported.
    #[must_use]
    pub fn is_supported(&self, locale: &LocaleCode) -> bool {
        self.supported_locales.contains(locale)
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self::with_default("en")
    }
}
