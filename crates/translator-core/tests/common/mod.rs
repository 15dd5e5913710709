// crates/translator-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared settings and service builders for core tests.
// Purpose: Keep fixtures identical across test binaries.
// Dependencies: translator-core
// ============================================================================

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

use std::collections::BTreeSet;

use translator_core::I18nSettings;
use translator_core::InMemoryTranslationStore;
use translator_core::LocaleCode;
use translator_core::SharedTranslationStore;
use translator_core::TranslationServices;

/// Settings with `en` as default and `en`/`fr` supported.
#[must_use]
pub fn sample_settings() -> I18nSettings {
    I18nSettings {
        default_locale: LocaleCode::new("en"),
        supported_locales: ["en", "fr"].into_iter().map(LocaleCode::new).collect::<BTreeSet<_>>(),
        strict_locales: false,
    }
}

/// Builds services over a fresh in-memory store, returning the store too.
#[must_use]
pub fn services_with_store() -> (TranslationServices, InMemoryTranslationStore) {
    services_with_settings(sample_settings())
}

/// Builds services with explicit settings over a fresh in-memory store.
#[must_use]
pub fn services_with_settings(
    settings: I18nSettings,
) -> (TranslationServices, InMemoryTranslationStore) {
    let store = InMemoryTranslationStore::new();
    let shared = SharedTranslationStore::from_store(store.clone());
    (TranslationServices::new(shared, settings), store)
}

/// Store that fails every operation, for persistence error paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl translator_core::TranslationStore for FailingStore {
    fn get(
        &self,
        _key: &translator_core::TranslationKey,
        _locale: &LocaleCode,
    ) -> Result<Option<String>, translator_core::StoreError> {
        Err(translator_core::StoreError::Io("disk unavailable".to_string()))
    }

    fn upsert(
        &self,
        _entry: &translator_core::TranslationEntry,
    ) -> Result<(), translator_core::StoreError> {
        Err(translator_core::StoreError::Io("disk unavailable".to_string()))
    }

    fn remove(
        &self,
        _key: &translator_core::TranslationKey,
        _locale: &LocaleCode,
    ) -> Result<bool, translator_core::StoreError> {
        Err(translator_core::StoreError::Io("disk unavailable".to_string()))
    }

    fn list(
        &self,
        _filter: &translator_core::EntryFilter,
    ) -> Result<Vec<translator_core::TranslationEntry>, translator_core::StoreError> {
        Err(translator_core::StoreError::Io("disk unavailable".to_string()))
    }
}

/// Builds services over a store that always fails.
#[must_use]
pub fn failing_services() -> TranslationServices {
    TranslationServices::new(SharedTranslationStore::from_store(FailingStore), sample_settings())
}
