// crates/translator-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: translator-cli i18n module and the `t!` macro.
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
    reason = "Test-only output and panic-based assertions are permitted."
)]

use translator_cli::i18n::MessageArg;
use translator_cli::i18n::translate;
use translator_cli::t;

#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("path", "/tmp/translations.json");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "/tmp/translations.json");
}

#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("count", "3"), MessageArg::new("path", "/tmp/out.json")];
    let result = translate("translation.export.ok", args);
    assert_eq!(result, "Exported 3 translations to /tmp/out.json");
}

#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

#[test]
fn t_macro_formats_message() {
    let rendered = t!("main.version", version = "0.1.0");
    assert_eq!(rendered, "translator 0.1.0");
}
