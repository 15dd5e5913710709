// crates/translator-store-sqlite/tests/sqlite_store.rs
// ============================================================================
// Module: SQLite Translation Store Tests
// Description: Durability and contract tests for the SQLite store.
// Purpose: Validate persistence, schema versioning, path safety, and listing.
// Dependencies: translator-store-sqlite, translator-core, rusqlite, tempfile
// ============================================================================

//! ## Overview
//! Exercises the `SQLite` store through the [`TranslationStore`] contract:
//! - Upsert replaces text for an existing pair
//! - Entries survive a reopen
//! - Schema version mismatches fail closed
//! - Path safety checks reject overlong paths and directories

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

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use rusqlite::Connection;
use rusqlite::params;
use tempfile::TempDir;
use translator_core::EntryFilter;
use translator_core::I18nSettings;
use translator_core::LocaleCode;
use translator_core::MAX_TEXT_BYTES;
use translator_core::SharedTranslationStore;
use translator_core::TranslationEntry;
use translator_core::TranslationKey;
use translator_core::TranslationServices;
use translator_core::TranslationStore;
use translator_store_sqlite::SqliteStoreConfig;
use translator_store_sqlite::SqliteStoreError;
use translator_store_sqlite::SqliteStoreMode;
use translator_store_sqlite::SqliteSyncMode;
use translator_store_sqlite::SqliteTranslationStore;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn open_store(path: &Path) -> SqliteTranslationStore {
    SqliteTranslationStore::new(&SqliteStoreConfig::for_path(path)).unwrap()
}

fn key(value: &str) -> TranslationKey {
    TranslationKey::new(value)
}

fn locale(value: &str) -> LocaleCode {
    LocaleCode::new(value)
}

// ============================================================================
// SECTION: Contract
// ============================================================================

#[test]
fn upsert_then_get_returns_text() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    store.upsert(&TranslationEntry::new("welcome", "fr", "Bienvenue")).unwrap();
    assert_eq!(store.get(&key("welcome"), &locale("fr")).unwrap().as_deref(), Some("Bienvenue"));
    assert!(store.get(&key("welcome"), &locale("de")).unwrap().is_none());
}

#[test]
fn upsert_replaces_existing_pair() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    store.upsert(&TranslationEntry::new("title", "en", "Old")).unwrap();
    store.upsert(&TranslationEntry::new("title", "en", "New")).unwrap();
    let entries = store.list(&EntryFilter::all()).unwrap();
    assert_eq!(entries, vec![TranslationEntry::new("title", "en", "New")]);
}

#[test]
fn entries_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("store.db");
    {
        let store = open_store(&path);
        store
            .upsert_many(&[
                TranslationEntry::new("a", "en", "A"),
                TranslationEntry::new("a", "fr", "À"),
            ])
            .unwrap();
    }
    let reopened = open_store(&path);
    assert_eq!(reopened.get(&key("a"), &locale("fr")).unwrap().as_deref(), Some("À"));
    assert_eq!(reopened.list(&EntryFilter::all()).unwrap().len(), 2);
}

#[test]
fn remove_reports_whether_entry_existed() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    store.upsert(&TranslationEntry::new("k", "en", "v")).unwrap();
    assert!(store.remove(&key("k"), &locale("en")).unwrap());
    assert!(!store.remove(&key("k"), &locale("en")).unwrap());
    assert!(store.get(&key("k"), &locale("en")).unwrap().is_none());
}

#[test]
fn list_filters_orders_and_paginates() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    store
        .upsert_many(&[
            TranslationEntry::new("nav.home", "fr", "Accueil"),
            TranslationEntry::new("nav.home", "en", "Home"),
            TranslationEntry::new("nav.about", "en", "About"),
            TranslationEntry::new("footer", "en", "Footer"),
        ])
        .unwrap();

    let all = store.list(&EntryFilter::all()).unwrap();
    let pairs: Vec<(&str, &str)> =
        all.iter().map(|entry| (entry.key.as_str(), entry.locale.as_str())).collect();
    assert_eq!(pairs, vec![
        ("footer", "en"),
        ("nav.about", "en"),
        ("nav.home", "en"),
        ("nav.home", "fr"),
    ]);

    let prefixed = store
        .list(&EntryFilter {
            key_prefix: Some("nav.".to_string()),
            locale: Some(locale("en")),
            ..EntryFilter::all()
        })
        .unwrap();
    assert_eq!(prefixed.len(), 2);

    let page = store
        .list(&EntryFilter {
            limit: Some(1),
            offset: 2,
            ..EntryFilter::all()
        })
        .unwrap();
    assert_eq!(page, vec![TranslationEntry::new("nav.home", "en", "Home")]);
}

#[test]
fn prefix_filter_treats_wildcards_literally() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    store
        .upsert_many(&[
            TranslationEntry::new("a_b", "en", "1"),
            TranslationEntry::new("axb", "en", "2"),
            TranslationEntry::new("a%c", "en", "3"),
        ])
        .unwrap();
    let matched = store
        .list(&EntryFilter {
            key_prefix: Some("a_".to_string()),
            ..EntryFilter::all()
        })
        .unwrap();
    assert_eq!(matched, vec![TranslationEntry::new("a_b", "en", "1")]);
}

#[test]
fn oversized_text_is_rejected_without_write() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    let entries = [
        TranslationEntry::new("ok", "en", "fine"),
        TranslationEntry::new("big", "en", "x".repeat(MAX_TEXT_BYTES + 1)),
    ];
    assert!(store.upsert_many(&entries).is_err());
    assert!(store.list(&EntryFilter::all()).unwrap().is_empty());
}

#[test]
fn concurrent_writers_do_not_lose_entries() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir.path().join("store.db")));
    let handles: Vec<_> = (0 .. 4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for index in 0 .. 10 {
                    let entry = TranslationEntry::new(format!("k{worker}.{index}"), "en", "v");
                    store.upsert(&entry).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.list(&EntryFilter::all()).unwrap().len(), 40);
}

#[test]
fn services_fall_back_over_sqlite() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir.path().join("store.db"));
    let services = TranslationServices::new(
        SharedTranslationStore::from_store(store),
        I18nSettings::with_default("en"),
    );
    services.insert.insert(&key("greeting"), &locale("en"), "Hello").unwrap();
    let requested: BTreeSet<TranslationKey> = std::iter::once(key("greeting")).collect();
    let fetched = services.fetch.fetch(&requested, &locale("fr")).unwrap();
    assert_eq!(fetched[&key("greeting")], "Hello");
}

// ============================================================================
// SECTION: Integrity
// ============================================================================

#[test]
fn schema_version_mismatch_fails_closed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");
    drop(open_store(&path));
    let connection = Connection::open(&path).unwrap();
    connection.execute("UPDATE store_meta SET version = ?1", params![99]).unwrap();
    drop(connection);
    let result = SqliteTranslationStore::new(&SqliteStoreConfig::for_path(&path));
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
}

#[test]
fn rejects_empty_path() {
    let result = SqliteTranslationStore::new(&SqliteStoreConfig::for_path(""));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn rejects_directory_path() {
    let dir = TempDir::new().unwrap();
    let result = SqliteTranslationStore::new(&SqliteStoreConfig::for_path(dir.path()));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn rejects_overlong_path_component() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a".repeat(300));
    let result = SqliteTranslationStore::new(&SqliteStoreConfig::for_path(path));
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn delete_journal_and_normal_sync_are_accepted() {
    let dir = TempDir::new().unwrap();
    let config = SqliteStoreConfig {
        journal_mode: SqliteStoreMode::Delete,
        sync_mode: SqliteSyncMode::Normal,
        ..SqliteStoreConfig::for_path(dir.path().join("store.db"))
    };
    let store = SqliteTranslationStore::new(&config).unwrap();
    store.upsert(&TranslationEntry::new("k", "en", "v")).unwrap();
    assert_eq!(store.get(&key("k"), &locale("en")).unwrap().as_deref(), Some("v"));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn last_upsert_wins(texts in proptest::collection::vec(".{0,24}", 1..5)) {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir.path().join("store.db"));
        for text in &texts {
            store.upsert(&TranslationEntry::new("k", "en", text.clone())).unwrap();
        }
        let stored = store.get(&key("k"), &locale("en")).unwrap();
        prop_assert_eq!(stored.as_ref(), texts.last());
    }
}
