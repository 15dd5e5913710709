// crates/translator-core/src/lib.rs
// ============================================================================
// Module: Translator Core Library
// Description: Public API surface for the Translator core.
// Purpose: Expose translation types, store interfaces, and services.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Translator core stores `(key, locale) -> text` entries and serves them to
//! renderers with a default-locale fallback. It is backend-agnostic: every
//! service talks to a [`TranslationStore`] supplied at construction, together
//! with the [`I18nSettings`] that name the default and supported locales.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::StoreError;
pub use interfaces::TranslationStore;
pub use runtime::AdminService;
pub use runtime::FetchService;
pub use runtime::ImportReport;
pub use runtime::InMemoryTranslationStore;
pub use runtime::InsertService;
pub use runtime::Resolved;
pub use runtime::SharedTranslationStore;
pub use runtime::TranslationError;
pub use runtime::TranslationServices;
pub use runtime::Translator;
pub use runtime::interpolate;
