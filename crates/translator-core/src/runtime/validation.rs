// crates/translator-core/src/runtime/validation.rs
// ============================================================================
// Module: Input Validation
// Description: Shape checks for keys, locales, and texts.
// Purpose: Reject malformed input before any store access.
// Dependencies: crate::core
// ============================================================================

use crate::core::I18nSettings;
use crate::core::LocaleCode;
use crate::core::MAX_KEY_BYTES;
use crate::core::MAX_LOCALE_BYTES;
use crate::core::MAX_TEXT_BYTES;
use crate::core::TranslationEntry;
use crate::core::TranslationKey;
use crate::runtime::error::TranslationError;

/// Rejects empty or oversized keys.
pub(crate) fn validate_key(key: &TranslationKey) -> Result<(), TranslationError> {
    if key.as_str().is_empty() {
        return Err(TranslationError::Validation("key must be non-empty".to_string()));
    }
    if key.as_str().len() > MAX_KEY_BYTES {
        return Err(TranslationError::Validation(format!(
            "key exceeds {MAX_KEY_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Rejects empty or oversized locales.
pub(crate) fn validate_locale(locale: &LocaleCode) -> Result<(), TranslationError> {
    if locale.as_str().is_empty() {
        return Err(TranslationError::Validation("locale must be non-empty".to_string()));
    }
    if locale.as_str().len() > MAX_LOCALE_BYTES {
        return Err(TranslationError::Validation(format!(
            "locale exceeds {MAX_LOCALE_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Validates an entry for writing, including the strict-locale policy.
pub(crate) fn validate_entry(
    entry: &TranslationEntry,
    i18n: &I18nSettings,
) -> Result<(), TranslationError> {
    validate_key(&entry.key)?;
    validate_locale(&entry.locale)?;
    if entry.text.len() > MAX_TEXT_BYTES {
        return Err(TranslationError::Validation(format!(
            "text for {} exceeds {MAX_TEXT_BYTES} bytes",
            entry.key
        )));
    }
    if i18n.strict_locales && !i18n.is_supported(&entry.locale) {
        return Err(TranslationError::Validation(format!(
            "locale {} is not supported",
            entry.locale
        )));
    }
    Ok(())
}
