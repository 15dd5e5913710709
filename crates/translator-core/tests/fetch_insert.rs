// crates/translator-core/tests/fetch_insert.rs
// ============================================================================
// Module: Fetch and Insert Tests
// Description: Read/write path behavior of the translation services.
// Purpose: Check write-then-read, last-write-wins, fallback, and validation.
// Dependencies: translator-core
// ============================================================================

//! ## Overview
//! Exercises the fetch and insert services over the in-memory store,
//! including the default-locale fallback and the no-mutation guarantee for
//! rejected inserts.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use translator_core::I18nSettings;
use translator_core::InMemoryTranslationStore;
use translator_core::LocaleCode;
use translator_core::MAX_KEY_BYTES;
use translator_core::SharedTranslationStore;
use translator_core::TranslationEntry;
use translator_core::TranslationError;
use translator_core::TranslationKey;
use translator_core::TranslationStore;

use crate::common::failing_services;
use crate::common::sample_settings;
use crate::common::services_with_settings;
use crate::common::services_with_store;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn keys(values: &[&str]) -> BTreeSet<TranslationKey> {
    values.iter().map(|value| TranslationKey::new(*value)).collect()
}

fn locale(value: &str) -> LocaleCode {
    LocaleCode::new(value)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn welcome_message_scenario() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("welcome_message");
    services.insert.insert(&key, &locale("en"), "Welcome").unwrap();
    services.insert.insert(&key, &locale("fr"), "Bienvenue").unwrap();

    let fr = services.fetch.fetch(&keys(&["welcome_message"]), &locale("fr")).unwrap();
    assert_eq!(fr.get(&key).map(String::as_str), Some("Bienvenue"));

    let de = services.fetch.fetch(&keys(&["welcome_message"]), &locale("de")).unwrap();
    assert_eq!(de.get(&key).map(String::as_str), Some("Welcome"));
}

#[test]
fn insert_then_fetch_returns_text() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("cart.checkout");
    services.insert.insert(&key, &locale("fr"), "Passer la commande").unwrap();
    let result = services.fetch.fetch(&keys(&["cart.checkout"]), &locale("fr")).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[&key], "Passer la commande");
}

#[test]
fn reinsert_overwrites_previous_text() {
    let (services, store) = services_with_store();
    let key = TranslationKey::new("title");
    services.insert.insert(&key, &locale("en"), "Old").unwrap();
    services.insert.insert(&key, &locale("en"), "New").unwrap();
    let resolved = services.fetch.fetch_one(&key, &locale("en")).unwrap().unwrap();
    assert_eq!(resolved.text, "New");
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn reinsert_identical_text_is_noop() {
    let (services, store) = services_with_store();
    let key = TranslationKey::new("title");
    services.insert.insert(&key, &locale("en"), "Same").unwrap();
    services.insert.insert(&key, &locale("en"), "Same").unwrap();
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(services.fetch.fetch_one(&key, &locale("en")).unwrap().unwrap().text, "Same");
}

#[test]
fn empty_text_is_stored_and_returned() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("blank");
    services.insert.insert(&key, &locale("fr"), "").unwrap();
    let resolved = services.fetch.fetch_one(&key, &locale("fr")).unwrap().unwrap();
    assert_eq!(resolved.text, "");
    assert_eq!(resolved.locale, locale("fr"));
}

#[test]
fn fetch_falls_back_to_default_locale() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("greeting");
    services.insert.insert(&key, &locale("en"), "Hello").unwrap();
    let resolved = services.fetch.fetch_one(&key, &locale("fr")).unwrap().unwrap();
    assert_eq!(resolved.text, "Hello");
    assert_eq!(resolved.locale, locale("en"));
    assert!(resolved.is_fallback(&locale("fr")));
}

#[test]
fn fetch_prefers_requested_locale_over_default() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("greeting");
    services.insert.insert(&key, &locale("en"), "Hello").unwrap();
    services.insert.insert(&key, &locale("fr"), "Bonjour").unwrap();
    let resolved = services.fetch.fetch_one(&key, &locale("fr")).unwrap().unwrap();
    assert_eq!(resolved.text, "Bonjour");
    assert!(!resolved.is_fallback(&locale("fr")));
}

#[test]
fn fetch_omits_keys_absent_in_both_locales() {
    let (services, _) = services_with_store();
    services.insert.insert(&TranslationKey::new("present"), &locale("en"), "Here").unwrap();
    let result = services.fetch.fetch(&keys(&["present", "missing"]), &locale("de")).unwrap();
    assert_eq!(result.len(), 1);
    assert!(!result.contains_key(&TranslationKey::new("missing")));
}

#[test]
fn fetch_one_returns_none_when_absent() {
    let (services, _) = services_with_store();
    let result = services.fetch.fetch_one(&TranslationKey::new("nothing"), &locale("en")).unwrap();
    assert!(result.is_none());
}

#[test]
fn fetch_with_empty_key_set_returns_empty_map() {
    let (services, _) = services_with_store();
    let result = services.fetch.fetch(&BTreeSet::new(), &locale("en")).unwrap();
    assert!(result.is_empty());
}

#[test]
fn fetch_rejects_empty_locale() {
    let (services, _) = services_with_store();
    let err = services.fetch.fetch(&keys(&["a"]), &locale("")).unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
}

#[test]
fn fetch_rejects_empty_key_in_set() {
    let (services, _) = services_with_store();
    let err = services.fetch.fetch(&keys(&["a", ""]), &locale("en")).unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
}

#[test]
fn insert_rejects_empty_key_without_mutation() {
    let (services, store) = services_with_store();
    let err = services.insert.insert(&TranslationKey::new(""), &locale("en"), "x").unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
    assert!(store.is_empty().unwrap());
}

#[test]
fn insert_rejects_empty_locale_without_mutation() {
    let (services, store) = services_with_store();
    let err = services.insert.insert(&TranslationKey::new("k"), &locale(""), "x").unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
    assert!(store.is_empty().unwrap());
}

#[test]
fn insert_rejects_oversized_key() {
    let (services, store) = services_with_store();
    let key = TranslationKey::new("k".repeat(MAX_KEY_BYTES + 1));
    let err = services.insert.insert(&key, &locale("en"), "x").unwrap_err();
    assert!(err.to_string().contains("key exceeds"));
    assert!(store.is_empty().unwrap());
}

#[test]
fn strict_locales_rejects_unsupported_locale() {
    let settings = I18nSettings {
        strict_locales: true,
        ..sample_settings()
    };
    let (services, store) = services_with_settings(settings);
    let key = TranslationKey::new("k");
    let err = services.insert.insert(&key, &locale("de"), "Hallo").unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
    assert!(store.is_empty().unwrap());
    services.insert.insert(&key, &locale("fr"), "Salut").unwrap();
}

#[test]
fn lenient_locales_accept_any_locale() {
    let (services, _) = services_with_store();
    services.insert.insert(&TranslationKey::new("k"), &locale("pt-BR"), "Olá").unwrap();
}

#[test]
fn save_key_writes_every_locale() {
    let (services, _) = services_with_store();
    let key = TranslationKey::new("nav.home");
    let mut translations = BTreeMap::new();
    translations.insert(locale("en"), "Home".to_string());
    translations.insert(locale("fr"), "Accueil".to_string());
    assert_eq!(services.insert.save_key(&key, &translations).unwrap(), 2);
    assert_eq!(services.fetch.fetch_one(&key, &locale("fr")).unwrap().unwrap().text, "Accueil");
}

#[test]
fn save_key_with_invalid_locale_writes_nothing() {
    let (services, store) = services_with_store();
    let mut translations = BTreeMap::new();
    translations.insert(locale("en"), "Home".to_string());
    translations.insert(locale(""), "Broken".to_string());
    let err = services.insert.save_key(&TranslationKey::new("nav.home"), &translations).unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
    assert!(store.is_empty().unwrap());
}

#[test]
fn store_failure_aborts_fetch() {
    let services = failing_services();
    let err = services.fetch.fetch(&keys(&["a", "b"]), &locale("en")).unwrap_err();
    assert!(matches!(err, TranslationError::Persistence(_)));
    assert_eq!(err.kind(), "persistence");
}

#[test]
fn store_failure_propagates_from_insert() {
    let services = failing_services();
    let err = services.insert.insert(&TranslationKey::new("a"), &locale("en"), "x").unwrap_err();
    assert!(matches!(err, TranslationError::Persistence(_)));
}

#[test]
fn validation_precedes_store_access() {
    let services = failing_services();
    let err = services.insert.insert(&TranslationKey::new(""), &locale("en"), "x").unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
}

#[test]
fn store_trait_objects_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn TranslationStore>();
    assert_send_sync::<SharedTranslationStore>();

    let store: Arc<dyn TranslationStore> = Arc::new(InMemoryTranslationStore::new());
    let writer = Arc::clone(&store);
    thread::spawn(move || writer.upsert(&TranslationEntry::new("a", "en", "A")))
        .join()
        .unwrap()
        .unwrap();
    let shared = SharedTranslationStore::new(store);
    let text = shared.get(&TranslationKey::new("a"), &locale("en")).unwrap();
    assert_eq!(text.as_deref(), Some("A"));
}
