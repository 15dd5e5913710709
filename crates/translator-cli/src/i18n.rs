// crates/translator-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for the supported CLI locales.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The translator CLI stores user-facing strings in a small static catalog
//! so every message has one source of truth per locale. All runtime output
//! should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// French.
    Fr,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Fr];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "translator {version}"),
    (
        "serve.warn.local_only_auth",
        "Info: admin routes accept loopback callers only. Configure server.auth with \
         mode = \"bearer_token\" before exposing the server.",
    ),
    ("serve.config.load_failed", "Failed to load config: {error}"),
    ("serve.init_failed", "Failed to initialize translator server: {error}"),
    ("serve.failed", "Translator server failed: {error}"),
    ("serve.listening", "Translator server listening on {bind}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    ("input.parse_failed", "Failed to parse {kind} JSON at {path}: {error}"),
    ("input.kind.import", "import file"),
    ("logging.init_failed", "Failed to initialize logging: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("store.open_failed", "Failed to open translation store: {error}"),
    (
        "store.memory_offline",
        "Offline commands need a persistent store. Set store.type = \"sqlite\" and store.path \
         in the config.",
    ),
    ("translation.get.failed", "Failed to fetch translation: {error}"),
    ("translation.get.not_found", "No translation for {key} in {locale} or the default locale."),
    ("translation.get.fallback", "Note: {key} resolved from {resolved} instead of {locale}."),
    ("translation.insert.failed", "Failed to save translation: {error}"),
    ("translation.insert.ok", "Saved {key} ({locale})."),
    ("translation.remove.failed", "Failed to remove translation: {error}"),
    ("translation.remove.ok", "Removed {key} ({locale})."),
    ("translation.list.failed", "Failed to list translations: {error}"),
    ("translation.list.none", "No translations found."),
    ("translation.list.entry", "{key} [{locale}] {text}"),
    ("translation.export.failed", "Failed to export translations: {error}"),
    ("translation.export.serialize_failed", "Failed to serialize translations: {error}"),
    ("translation.export.write_failed", "Failed to write translations to {path}: {error}"),
    ("translation.export.ok", "Exported {count} translations to {path}"),
    ("translation.import.failed", "Failed to import translations: {error}"),
    (
        "translation.import.ok",
        "Imported {imported} translations across {keys} keys (locales: {locales}).",
    ),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'fr'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static French catalog entries.
const CATALOG_FR: &[(&str, &str)] = &[
    ("main.version", "translator {version}"),
    (
        "serve.warn.local_only_auth",
        "Info : les routes d'administration n'acceptent que les appels locaux. Configurez \
         server.auth avec mode = \"bearer_token\" avant d'exposer le serveur.",
    ),
    ("serve.config.load_failed", "Impossible de charger la configuration : {error}"),
    ("serve.init_failed", "Impossible d'initialiser le serveur de traduction : {error}"),
    ("serve.failed", "Échec du serveur de traduction : {error}"),
    ("serve.listening", "Serveur de traduction à l'écoute sur {bind}"),
    ("output.stream.stdout", "sortie standard"),
    ("output.stream.stderr", "sortie d'erreur"),
    ("output.stream.unknown", "sortie"),
    ("output.write_failed", "Impossible d'écrire sur {stream} : {error}"),
    (
        "input.read_too_large",
        "Lecture de {kind} à {path} refusée : {size} octets (limite {limit}).",
    ),
    ("input.read_failed", "Impossible de lire {kind} à {path} : {error}"),
    ("input.parse_failed", "Impossible d'analyser le JSON de {kind} à {path} : {error}"),
    ("input.kind.import", "fichier d'import"),
    ("logging.init_failed", "Impossible d'initialiser la journalisation : {error}"),
    ("config.load_failed", "Impossible de charger la configuration : {error}"),
    ("config.validate.ok", "Configuration valide."),
    ("store.open_failed", "Impossible d'ouvrir le stockage des traductions : {error}"),
    (
        "store.memory_offline",
        "Les commandes hors ligne exigent un stockage persistant. Définissez store.type = \"sqlite\" \
         et store.path dans la configuration.",
    ),
    ("translation.get.failed", "Impossible de récupérer la traduction : {error}"),
    (
        "translation.get.not_found",
        "Aucune traduction pour {key} en {locale} ni dans la langue par défaut.",
    ),
    ("translation.get.fallback", "Note : {key} résolu depuis {resolved} au lieu de {locale}."),
    ("translation.insert.failed", "Impossible d'enregistrer la traduction : {error}"),
    ("translation.insert.ok", "{key} ({locale}) enregistré."),
    ("translation.remove.failed", "Impossible de supprimer la traduction : {error}"),
    ("translation.remove.ok", "{key} ({locale}) supprimé."),
    ("translation.list.failed", "Impossible de lister les traductions : {error}"),
    ("translation.list.none", "Aucune traduction trouvée."),
    ("translation.list.entry", "{key} [{locale}] {text}"),
    ("translation.export.failed", "Impossible d'exporter les traductions : {error}"),
    ("translation.export.serialize_failed", "Impossible de sérialiser les traductions : {error}"),
    (
        "translation.export.write_failed",
        "Impossible d'écrire les traductions dans {path} : {error}",
    ),
    ("translation.export.ok", "{count} traductions exportées vers {path}"),
    ("translation.import.failed", "Impossible d'importer les traductions : {error}"),
    (
        "translation.import.ok",
        "{imported} traductions importées pour {keys} clés (langues : {locales}).",
    ),
    ("i18n.lang.invalid_env", "Valeur invalide pour {env} : {value}. Attendu 'en' ou 'fr'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note : la sortie non anglaise est traduite automatiquement et peut être inexacte.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
#[must_use]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Fr => CATALOG_FR,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_FR_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Fr => CATALOG_FR_MAP.get_or_init(|| CATALOG_FR.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit locale.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    // Single pass: substituted values are never rescanned for placeholders.
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[.. start]);
        let after = &rest[start + 1 ..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start ..]);
            return result;
        };
        let name = &after[.. end];
        match args.iter().find(|arg| arg.key == name) {
            Some(arg) => result.push_str(&arg.value),
            None => result.push_str(&rest[start ..= start + end + 1]),
        }
        rest = &after[end + 1 ..];
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
