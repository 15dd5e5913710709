// crates/translator-config/src/lib.rs
// ============================================================================
// Module: Translator Config Library
// Description: Configuration model and validation for translator.toml.
// Purpose: Single source of truth for translator.toml semantics.
// Dependencies: translator-core, translator-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `translator-config` defines the configuration model for the translator
//! service and CLI. Loading is strict and fail-closed: oversized files,
//! invalid UTF-8, unknown enum values, and inconsistent settings are all
//! rejected before any store is opened.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
