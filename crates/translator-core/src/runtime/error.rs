// crates/translator-core/src/runtime/error.rs
// ============================================================================
// Module: Translator Service Errors
// Description: Error taxonomy surfaced by the translation services.
// Purpose: Separate caller mistakes, absent entries, and storage failures.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! Services return [`TranslationError`]. Validation errors are the caller's
//! to fix, not-found is an ordinary outcome, and persistence errors are
//! logged once at the point they are converted.

use thiserror::Error;

use crate::core::LocaleCode;
use crate::core::TranslationKey;
use crate::interfaces::StoreError;

/// Errors returned by the translation services.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Malformed input (empty key or locale, oversized values).
    #[error("validation error: {0}")]
    Validation(String),
    /// The requested `(key, locale)` pair does not exist.
    #[error("translation not found: {key} ({locale})")]
    NotFound {
        /// Requested key.
        key: TranslationKey,
        /// Requested locale.
        locale: LocaleCode,
    },
    /// The underlying store failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl TranslationError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound {
                ..
            } => "not_found",
            Self::Persistence(_) => "persistence",
        }
    }
}

impl From<StoreError> for TranslationError {
    fn from(error: StoreError) -> Self {
        tracing::error!(error = %error, "translation store operation failed");
        Self::Persistence(error.to_string())
    }
}
