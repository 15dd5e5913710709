// crates/translator-cli/src/lib.rs
// ============================================================================
// Module: Translator CLI Library
// Description: Shared helpers for the `translator` binary.
// Purpose: Expose the CLI message catalog to the binary and its tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Library half of the `translator` CLI. The binary in `main.rs` routes all
//! user-facing output through [`t!`].

pub mod i18n;

#[cfg(test)]
#[path = "tests/i18n.rs"]
mod i18n_tests;
