// crates/translator-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Starting point printed by `translator config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A canonical `translator.toml`. The config tests load it to keep it valid.

/// Returns a canonical example `translator.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:8080"
max_body_bytes = 1048576

[server.auth]
mode = "bearer_token"
bearer_tokens = ["change-me"]
protect_insert = true

[server.audit]
enabled = true
# path = "translator-audit.jsonl"

[i18n]
default_locale = "en"
supported_locales = ["en", "fr", "de"]
strict_locales = false

[store]
type = "sqlite"
path = "translations.sqlite"
busy_timeout_ms = 5000
journal_mode = "wal"
sync_mode = "full"

[routes]
get = "/api/translator/get"
insert = "/api/translator/insert"
admin_list = "/translator"
admin_edit = "/translator/edit"
admin_save = "/translator/save"
admin_remove = "/translator/remove"
"#,
    )
}
