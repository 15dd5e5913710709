// crates/translator-core/src/core/mod.rs
// ============================================================================
// Module: Translator Core Types
// Description: Data model for translation entries and locale settings.
// Purpose: Group identifiers, entries, and i18n settings under one namespace.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types shared by every Translator crate. Nothing in here touches
//! storage; validation of user input happens in the runtime services.

pub mod entry;
pub mod identifiers;
pub mod settings;

pub use entry::*;
pub use identifiers::*;
pub use settings::*;
