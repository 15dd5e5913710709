// crates/translator-core/tests/admin.rs
// ============================================================================
// Module: Admin Service Tests
// Description: Listing, per-key editing, removal, import, and export.
// Purpose: Validate the administrative surface over the in-memory store.
// Dependencies: translator-core, serde_json
// ============================================================================

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

use translator_core::EntryFilter;
use translator_core::LocaleCode;
use translator_core::MAX_LIST_LIMIT;
use translator_core::TranslationEntry;
use translator_core::TranslationError;
use translator_core::TranslationKey;

use crate::common::services_with_store;

fn seed(services: &translator_core::TranslationServices) {
    let entries = vec![
        TranslationEntry::new("nav.home", "en", "Home"),
        TranslationEntry::new("nav.home", "fr", "Accueil"),
        TranslationEntry::new("nav.about", "en", "About"),
        TranslationEntry::new("footer.copy", "en", "All rights reserved"),
    ];
    services.insert.import(&entries).unwrap();
}

#[test]
fn list_orders_by_key_then_locale() {
    let (services, _) = services_with_store();
    seed(&services);
    let entries = services.admin.list(&EntryFilter::all()).unwrap();
    let pairs: Vec<(&str, &str)> =
        entries.iter().map(|entry| (entry.key.as_str(), entry.locale.as_str())).collect();
    assert_eq!(pairs, vec![
        ("footer.copy", "en"),
        ("nav.about", "en"),
        ("nav.home", "en"),
        ("nav.home", "fr"),
    ]);
}

#[test]
fn list_filters_by_locale_and_prefix() {
    let (services, _) = services_with_store();
    seed(&services);
    let filter = EntryFilter {
        locale: Some(LocaleCode::new("en")),
        key_prefix: Some("nav.".to_string()),
        ..EntryFilter::all()
    };
    let entries = services.admin.list(&filter).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.locale.as_str() == "en"));
}

#[test]
fn list_paginates_with_offset_and_limit() {
    let (services, _) = services_with_store();
    seed(&services);
    let filter = EntryFilter {
        limit: Some(2),
        offset: 1,
        ..EntryFilter::all()
    };
    let entries = services.admin.list(&filter).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key.as_str(), "nav.about");
}

#[test]
fn list_caps_limit() {
    let (services, _) = services_with_store();
    let entries: Vec<TranslationEntry> = (0 .. MAX_LIST_LIMIT + 5)
        .map(|index| TranslationEntry::new(format!("key.{index:05}"), "en", "x"))
        .collect();
    services.insert.import(&entries).unwrap();
    let filter = EntryFilter {
        limit: Some(MAX_LIST_LIMIT * 2),
        ..EntryFilter::all()
    };
    assert_eq!(services.admin.list(&filter).unwrap().len(), MAX_LIST_LIMIT);
}

#[test]
fn translations_for_key_includes_supported_locales() {
    let (services, _) = services_with_store();
    services
        .insert
        .insert(&TranslationKey::new("nav.about"), &LocaleCode::new("de"), "Über uns")
        .unwrap();
    seed(&services);
    let translations = services.admin.translations_for_key(&TranslationKey::new("nav.about")).unwrap();
    assert_eq!(translations[&LocaleCode::new("en")], "About");
    assert_eq!(translations[&LocaleCode::new("fr")], "");
    assert_eq!(translations[&LocaleCode::new("de")], "Über uns");
}

#[test]
fn translations_for_key_ignores_longer_keys_with_same_prefix() {
    let (services, _) = services_with_store();
    services.insert.insert(&TranslationKey::new("nav"), &LocaleCode::new("en"), "Nav").unwrap();
    seed(&services);
    let translations = services.admin.translations_for_key(&TranslationKey::new("nav")).unwrap();
    assert_eq!(translations[&LocaleCode::new("en")], "Nav");
    assert_eq!(translations.len(), 2);
}

#[test]
fn remove_deletes_entry() {
    let (services, store) = services_with_store();
    seed(&services);
    services.admin.remove(&TranslationKey::new("nav.home"), &LocaleCode::new("fr")).unwrap();
    assert_eq!(store.len().unwrap(), 3);
    let resolved = services
        .fetch
        .fetch_one(&TranslationKey::new("nav.home"), &LocaleCode::new("fr"))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.text, "Home");
}

#[test]
fn remove_missing_entry_is_not_found() {
    let (services, _) = services_with_store();
    let err = services.admin.remove(&TranslationKey::new("ghost"), &LocaleCode::new("en")).unwrap_err();
    assert!(matches!(err, TranslationError::NotFound { .. }));
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn import_rejects_batch_with_invalid_entry() {
    let (services, store) = services_with_store();
    let entries = vec![
        TranslationEntry::new("ok", "en", "Fine"),
        TranslationEntry::new("", "en", "Broken"),
    ];
    let err = services.insert.import(&entries).unwrap_err();
    assert!(matches!(err, TranslationError::Validation(_)));
    assert!(store.is_empty().unwrap());
}

#[test]
fn import_reports_counts_and_later_duplicates_win() {
    let (services, _) = services_with_store();
    let entries = vec![
        TranslationEntry::new("a", "en", "first"),
        TranslationEntry::new("a", "fr", "premier"),
        TranslationEntry::new("a", "en", "second"),
    ];
    let report = services.insert.import(&entries).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.keys, 1);
    assert_eq!(report.locales.len(), 2);
    let resolved =
        services.fetch.fetch_one(&TranslationKey::new("a"), &LocaleCode::new("en")).unwrap().unwrap();
    assert_eq!(resolved.text, "second");
}

#[test]
fn export_roundtrips_through_json_import() {
    let (services, _) = services_with_store();
    seed(&services);
    let exported = services.admin.export().unwrap();
    let json = serde_json::to_string(&exported).unwrap();
    let parsed: Vec<TranslationEntry> = serde_json::from_str(&json).unwrap();

    let (fresh, _) = services_with_store();
    fresh.insert.import(&parsed).unwrap();
    assert_eq!(fresh.admin.export().unwrap(), exported);
}

#[test]
fn entries_serialize_with_plain_string_fields() {
    let entry = TranslationEntry::new("welcome", "fr", "Bienvenue");
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value, serde_json::json!({"key": "welcome", "locale": "fr", "text": "Bienvenue"}));
}
