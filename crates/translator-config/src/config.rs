// crates/translator-config/src/config.rs
// ============================================================================
// Module: Translator Configuration
// Description: Configuration loading and validation for the translator.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: translator-core, translator-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The resolved path comes from the caller (usually `--config`), then the
//! `TRANSLATOR_CONFIG` environment variable, then `translator.toml` in the
//! working directory. Every section has defaults, so an empty file is a valid
//! local-only, in-memory configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use translator_core::I18nSettings;
use translator_core::LocaleCode;
use translator_core::MAX_LOCALE_BYTES;
use translator_store_sqlite::SqliteStoreConfig;
use translator_store_sqlite::SqliteStoreMode;
use translator_store_sqlite::SqliteSyncMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "translator.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TRANSLATOR_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of server auth tokens.
const MAX_AUTH_TOKENS: usize = 64;
/// Maximum length of a server auth token.
const MAX_AUTH_TOKEN_LENGTH: usize = 256;
/// Maximum number of supported locales.
const MAX_SUPPORTED_LOCALES: usize = 256;
/// Maximum length of a route path.
const MAX_ROUTE_LENGTH: usize = 256;
/// Path reserved for the health probe.
pub const HEALTH_ROUTE: &str = "/health";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Translator service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslatorConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Locale settings.
    #[serde(default)]
    pub i18n: I18nConfig,
    /// Translation store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// HTTP route paths.
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl TranslatorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.i18n.validate()?;
        self.store.validate()?;
        self.routes.validate()?;
        Ok(())
    }

    /// Builds the locale settings injected into the translation services.
    #[must_use]
    pub fn i18n_settings(&self) -> I18nSettings {
        self.i18n.to_settings()
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Optional authentication configuration for admin routes.
    #[serde(default)]
    pub auth: Option<ServerAuthConfig>,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: ServerAuditConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            auth: None,
            audit: ServerAuditConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the effective auth mode (`local_only` when unset).
    #[must_use]
    pub fn auth_mode(&self) -> ServerAuthMode {
        self.auth.as_ref().map_or(ServerAuthMode::LocalOnly, |auth| auth.mode)
    }

    /// Returns whether the public insert route requires admin auth.
    #[must_use]
    pub fn protect_insert(&self) -> bool {
        self.auth.as_ref().is_none_or(|auth| auth.protect_insert)
    }

    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("invalid bind address".to_string()))
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(auth) = &self.auth {
            auth.validate()?;
        }
        self.audit.validate()?;
        let addr = self.bind_addr()?;
        if !addr.ip().is_loopback() && self.auth_mode() == ServerAuthMode::LocalOnly {
            return Err(ConfigError::Invalid(
                "non-loopback bind disallowed without bearer_token auth".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inbound auth modes for admin routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerAuthMode {
    /// Loopback callers only.
    #[default]
    LocalOnly,
    /// Bearer token authentication.
    BearerToken,
}

/// Server authentication configuration for admin routes.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerAuthConfig {
    /// Auth mode for admin requests.
    #[serde(default)]
    pub mode: ServerAuthMode,
    /// Accepted bearer tokens (required for `bearer_token` mode).
    #[serde(default)]
    pub bearer_tokens: Vec<String>,
    /// Apply admin auth to the public insert route.
    #[serde(default = "default_protect_insert")]
    pub protect_insert: bool,
}

impl ServerAuthConfig {
    /// Validates auth configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.bearer_tokens.len() > MAX_AUTH_TOKENS {
            return Err(ConfigError::Invalid("too many auth tokens".to_string()));
        }
        for token in &self.bearer_tokens {
            if token.trim().is_empty() {
                return Err(ConfigError::Invalid("auth token must be non-empty".to_string()));
            }
            if token.len() > MAX_AUTH_TOKEN_LENGTH {
                return Err(ConfigError::Invalid("auth token too long".to_string()));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(
                    "auth token must not contain whitespace".to_string(),
                ));
            }
        }
        match self.mode {
            ServerAuthMode::LocalOnly => Ok(()),
            ServerAuthMode::BearerToken => {
                if self.bearer_tokens.is_empty() {
                    return Err(ConfigError::Invalid(
                        "bearer_token auth requires bearer_tokens".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Audit logging configuration for HTTP requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerAuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for ServerAuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl ServerAuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("server.audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: I18n
// ============================================================================

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    /// Locale used when a translation is missing in the requested locale.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locales offered to administrators. Empty means the default only.
    #[serde(default)]
    pub supported_locales: Vec<String>,
    /// Reject inserts for locales outside `supported_locales`.
    #[serde(default)]
    pub strict_locales: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            supported_locales: Vec::new(),
            strict_locales: false,
        }
    }
}

impl I18nConfig {
    /// Converts the section into service settings.
    #[must_use]
    pub fn to_settings(&self) -> I18nSettings {
        let default_locale = LocaleCode::new(self.default_locale.trim());
        let mut supported_locales: BTreeSet<LocaleCode> =
            self.supported_locales.iter().map(|locale| LocaleCode::new(locale.trim())).collect();
        supported_locales.insert(default_locale.clone());
        I18nSettings {
            default_locale,
            supported_locales,
            strict_locales: self.strict_locales,
        }
    }

    /// Validates locale configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_locale("i18n.default_locale", &self.default_locale)?;
        if self.supported_locales.len() > MAX_SUPPORTED_LOCALES {
            return Err(ConfigError::Invalid("too many i18n.supported_locales".to_string()));
        }
        let mut seen = BTreeSet::new();
        for locale in &self.supported_locales {
            validate_locale("i18n.supported_locales", locale)?;
            if !seen.insert(locale.trim()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate locale in i18n.supported_locales: {locale}"
                )));
            }
        }
        if !self.supported_locales.is_empty() && !seen.contains(self.default_locale.trim()) {
            return Err(ConfigError::Invalid(
                "i18n.default_locale must be listed in i18n.supported_locales".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Translation store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend type.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// `SQLite` database path when using the sqlite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_store_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` synchronous mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::default(),
            path: None,
            busy_timeout_ms: default_store_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the `SQLite` settings when the sqlite backend is selected.
    #[must_use]
    pub fn sqlite_config(&self) -> Option<SqliteStoreConfig> {
        match (self.store_type, &self.path) {
            (StoreType::Sqlite, Some(path)) => Some(SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: self.busy_timeout_ms,
                journal_mode: self.journal_mode,
                sync_mode: self.sync_mode,
            }),
            _ => None,
        }
    }

    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.store_type {
            StoreType::Memory => {
                if self.path.is_some() {
                    return Err(ConfigError::Invalid("memory store must not set path".to_string()));
                }
                Ok(())
            }
            StoreType::Sqlite => {
                let path = self.path.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("sqlite store requires path".to_string())
                })?;
                validate_path_string("store.path", &path.to_string_lossy())?;
                if self.busy_timeout_ms == 0 {
                    return Err(ConfigError::Invalid(
                        "store.busy_timeout_ms must be greater than zero".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Store backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// Use the in-memory store.
    #[default]
    Memory,
    /// Use the `SQLite`-backed durable store.
    Sqlite,
}

// ============================================================================
// SECTION: Routes
// ============================================================================

/// HTTP route paths for the public and admin surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutesConfig {
    /// Public fetch route.
    #[serde(default = "default_route_get")]
    pub get: String,
    /// Public insert route.
    #[serde(default = "default_route_insert")]
    pub insert: String,
    /// Admin listing route.
    #[serde(default = "default_route_admin_list")]
    pub admin_list: String,
    /// Admin per-key edit route.
    #[serde(default = "default_route_admin_edit")]
    pub admin_edit: String,
    /// Admin per-key save route.
    #[serde(default = "default_route_admin_save")]
    pub admin_save: String,
    /// Admin removal route.
    #[serde(default = "default_route_admin_remove")]
    pub admin_remove: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            get: default_route_get(),
            insert: default_route_insert(),
            admin_list: default_route_admin_list(),
            admin_edit: default_route_admin_edit(),
            admin_save: default_route_admin_save(),
            admin_remove: default_route_admin_remove(),
        }
    }
}

impl RoutesConfig {
    /// Returns `(field, path)` pairs for every configured route.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("routes.get", self.get.as_str()),
            ("routes.insert", self.insert.as_str()),
            ("routes.admin_list", self.admin_list.as_str()),
            ("routes.admin_edit", self.admin_edit.as_str()),
            ("routes.admin_save", self.admin_save.as_str()),
            ("routes.admin_remove", self.admin_remove.as_str()),
        ]
    }

    /// Validates route paths.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for (field, path) in self.entries() {
            validate_route(field, path)?;
            if !seen.insert(path) {
                return Err(ConfigError::Invalid(format!("{field} duplicates another route")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
///
/// Paths are opened exactly as written, so surrounding whitespace is rejected.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() != value.len() {
        return Err(ConfigError::Invalid(format!(
            "{field} must not have leading or trailing whitespace"
        )));
    }
    if value.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(value);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a locale code from configuration.
fn validate_locale(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} entries must be non-empty")));
    }
    if trimmed.len() > MAX_LOCALE_BYTES {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_LOCALE_BYTES} bytes")));
    }
    Ok(())
}

/// Validates a single route path.
fn validate_route(field: &str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid(format!("{field} must start with '/'")));
    }
    if value.len() > MAX_ROUTE_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if value.chars().any(|ch| ch.is_whitespace() || matches!(ch, '?' | '#' | '{' | '}' | '*' | ':'))
    {
        return Err(ConfigError::Invalid(format!("{field} contains invalid characters")));
    }
    if value == HEALTH_ROUTE {
        return Err(ConfigError::Invalid(format!("{field} conflicts with {HEALTH_ROUTE}")));
    }
    Ok(())
}

/// Default bind address.
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default maximum request body size in bytes.
const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default audit logging toggle.
const fn default_audit_enabled() -> bool {
    true
}

/// Default insert protection toggle.
const fn default_protect_insert() -> bool {
    true
}

/// Default locale code.
fn default_locale() -> String {
    "en".to_string()
}

/// Default busy timeout for `SQLite` stores.
const fn default_store_busy_timeout_ms() -> u64 {
    5_000
}

/// Default public fetch route.
fn default_route_get() -> String {
    "/api/translator/get".to_string()
}

/// Default public insert route.
fn default_route_insert() -> String {
    "/api/translator/insert".to_string()
}

/// Default admin listing route.
fn default_route_admin_list() -> String {
    "/translator".to_string()
}

/// Default admin edit route.
fn default_route_admin_edit() -> String {
    "/translator/edit".to_string()
}

/// Default admin save route.
fn default_route_admin_save() -> String {
    "/translator/save".to_string()
}

/// Default admin remove route.
fn default_route_admin_remove() -> String {
    "/translator/remove".to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
