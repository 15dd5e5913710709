// crates/translator-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Translation Store
// Description: Durable TranslationStore backend using SQLite WAL.
// Purpose: Provide production persistence for translation entries.
// Dependencies: translator-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`TranslationStore`] implementation
//! holding one row per `(key, locale)` pair. Upserts are single statements,
//! so each write is atomic; concurrent writers to the same pair resolve
//! last-commit-wins.
//!
//! [`TranslationStore`]: translator_core::TranslationStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
pub use store::SqliteTranslationStore;
