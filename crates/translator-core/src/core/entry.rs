// crates/translator-core/src/core/entry.rs
// ============================================================================
// Module: Translation Entries
// Description: Translation entry records, listing filters, and size limits.
// Purpose: Define the flat record set owned by translation stores.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`TranslationEntry`] is one `(key, locale) -> text` mapping. At most one
//! entry exists per `(key, locale)` pair; writing the pair again replaces the
//! text with no history kept.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::LocaleCode;
use crate::core::identifiers::TranslationKey;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum translation key length in bytes.
pub const MAX_KEY_BYTES: usize = 512;
/// Maximum locale code length in bytes.
pub const MAX_LOCALE_BYTES: usize = 64;
/// Maximum translated text length in bytes.
pub const MAX_TEXT_BYTES: usize = 64 * 1024;
/// Default page size for administrative listings.
pub const DEFAULT_LIST_LIMIT: usize = 100;
/// Maximum page size for administrative listings.
pub const MAX_LIST_LIMIT: usize = 1_000;

// ============================================================================
// SECTION: Entries
// ============================================================================

/// A single translated string for one key in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Translation key.
    pub key: TranslationKey,
    /// Locale of the translated text.
    pub locale: LocaleCode,
    /// Translated text (may be empty).
    pub text: String,
}

impl TranslationEntry {
    /// Creates a new translation entry.
    #[must_use]
    pub fn new(
        key: impl Into<TranslationKey>,
        locale: impl Into<LocaleCode>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            locale: locale.into(),
            text: text.into(),
        }
    }
}

/// Filter applied when listing stored entries.
///
/// Results are always ordered by `(key, locale)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Only return entries in this locale.
    pub locale: Option<LocaleCode>,
    /// Only return entries whose key starts with this prefix.
    pub key_prefix: Option<String>,
    /// Maximum number of entries to return (`None` means unbounded).
    pub limit: Option<usize>,
    /// Number of matching entries to skip.
    pub offset: usize,
}

impl EntryFilter {
    /// Returns a filter matching every stored entry.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns true when the entry satisfies the locale and prefix filters.
    ///
    /// Pagination is not considered here.
    #[must_use]
    pub fn matches(&self, entry: &TranslationEntry) -> bool {
        if let Some(locale) = &self.locale
            && locale != &entry.locale
        {
            return false;
        }
        self.key_prefix.as_deref().is_none_or(|prefix| entry.key.as_str().starts_with(prefix))
    }
}
