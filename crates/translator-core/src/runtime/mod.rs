// crates/translator-core/src/runtime/mod.rs
// ============================================================================
// Module: Translator Runtime
// Description: Fetch, insert, and administrative services over a store.
// Purpose: Implement the read and write paths for translation entries.
// Dependencies: crate::core, crate::interfaces, tracing
// ============================================================================

//! ## Overview
//! Each service is a thin, clonable handle over a [`SharedTranslationStore`]
//! and the injected [`crate::I18nSettings`]. Calls are synchronous and run
//! within the scope of a single request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod admin;
pub mod error;
pub mod fetch;
pub mod insert;
pub mod render;
pub mod store;
mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use admin::AdminService;
pub use error::TranslationError;
pub use fetch::FetchService;
pub use fetch::Resolved;
pub use insert::ImportReport;
pub use insert::InsertService;
pub use render::Translator;
pub use render::interpolate;
pub use store::InMemoryTranslationStore;
pub use store::SharedTranslationStore;

use crate::core::I18nSettings;

// ============================================================================
// SECTION: Service Bundle
// ============================================================================

/// Fetch, insert, and admin services sharing one store and one settings value.
#[derive(Clone)]
pub struct TranslationServices {
    /// Read path.
    pub fetch: FetchService,
    /// Write path.
    pub insert: InsertService,
    /// Administrative listing and removal.
    pub admin: AdminService,
}

impl TranslationServices {
    /// Builds all services over the same store and settings.
    #[must_use]
    pub fn new(store: SharedTranslationStore, i18n: I18nSettings) -> Self {
        Self {
            fetch: FetchService::new(store.clone(), i18n.clone()),
            insert: InsertService::new(store.clone(), i18n.clone()),
            admin: AdminService::new(store, i18n),
        }
    }

    /// Returns a renderer handle bound to the given locale.
    #[must_use]
    pub fn translator(&self, locale: impl Into<crate::core::LocaleCode>) -> Translator {
        Translator::new(self.fetch.clone(), locale)
    }
}
