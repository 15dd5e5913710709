// crates/translator-core/src/core/identifiers.rs
// ============================================================================
// Module: Translator Identifiers
// Description: Opaque identifiers for translation keys and locales.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Keys and locales are opaque strings chosen by content authors. They
//! serialize transparently as strings. Emptiness and length checks are done
//! by the services at the request boundary, not by these wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Stable identifier for a translatable string, independent of locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationKey(String);

impl TranslationKey {
    /// Creates a new translation key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TranslationKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TranslationKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Locale code for a translation variant (for example a language tag).
///
/// No canonicalization is applied: `en-US` and `en_us` are distinct locales.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Creates a new locale code.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    /// Returns the locale as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LocaleCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocaleCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
