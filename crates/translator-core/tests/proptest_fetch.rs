// crates/translator-core/tests/proptest_fetch.rs
// ============================================================================
// Module: Fetch Property Tests
// Description: Property-based checks for the read and write paths.
// Purpose: Exercise write-then-read and last-write-wins over random input.
// Dependencies: translator-core, proptest
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

use std::collections::BTreeSet;

use proptest::prelude::*;
use translator_core::LocaleCode;
use translator_core::TranslationKey;

use crate::common::services_with_store;

proptest! {
    #[test]
    fn insert_then_fetch_returns_inserted_text(
        key in "[a-z][a-z0-9_.]{0,30}",
        locale in "[a-z]{2}(-[A-Z]{2})?",
        text in ".{0,80}",
    ) {
        let (services, _) = services_with_store();
        let key = TranslationKey::new(key);
        let locale = LocaleCode::new(locale);
        services.insert.insert(&key, &locale, &text).unwrap();
        let requested: BTreeSet<TranslationKey> = std::iter::once(key.clone()).collect();
        let fetched = services.fetch.fetch(&requested, &locale).unwrap();
        prop_assert_eq!(fetched.get(&key), Some(&text));
    }

    #[test]
    fn last_write_wins(
        key in "[a-z]{1,12}",
        texts in proptest::collection::vec(".{0,20}", 1..6),
    ) {
        let (services, store) = services_with_store();
        let key = TranslationKey::new(key);
        let locale = LocaleCode::new("fr");
        for text in &texts {
            services.insert.insert(&key, &locale, text).unwrap();
        }
        let resolved = services.fetch.fetch_one(&key, &locale).unwrap().unwrap();
        prop_assert_eq!(Some(&resolved.text), texts.last());
        prop_assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn absent_keys_never_error(keys in proptest::collection::btree_set("[a-z]{1,8}", 0..10)) {
        let (services, _) = services_with_store();
        let requested: BTreeSet<TranslationKey> = keys.into_iter().map(TranslationKey::new).collect();
        let fetched = services.fetch.fetch(&requested, &LocaleCode::new("de")).unwrap();
        prop_assert!(fetched.is_empty());
    }
}
