// crates/translator-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Translation Store
// Description: Durable TranslationStore backed by SQLite WAL.
// Purpose: Persist translation entries keyed by (key, locale).
// Dependencies: translator-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`TranslationStore`] using `SQLite`. The
//! `translations` table has a composite primary key on `(translation_key,
//! locale)`, which enforces the one-entry-per-pair invariant. A single
//! connection is shared behind a mutex. Opening a database written with a
//! different schema version fails closed.

// ============================================================================//
// SECTION: Imports
// ============================================================================//

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use translator_core::EntryFilter;
use translator_core::LocaleCode;
use translator_core::MAX_TEXT_BYTES;
use translator_core::StoreError;
use translator_core::TranslationEntry;
use translator_core::TranslationKey;
use translator_core::TranslationStore;

// ============================================================================//
// SECTION: Constants
// ============================================================================//

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================//
// SECTION: Config
// ============================================================================//

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` translation store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a config with default timeouts and pragmas for a path.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================//
// SECTION: Errors
// ============================================================================//

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Text exceeded the entry size limit.
    #[error("sqlite store payload too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual payload size in bytes.
        actual_bytes: usize,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::TooLarge {
                max_bytes,
                actual_bytes,
            } => Self::Invalid(format!(
                "text exceeds size limit: {actual_bytes} bytes (max {max_bytes})"
            )),
        }
    }
}

impl From<rusqlite::Error> for SqliteStoreError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Db(error.to_string())
    }
}

// ============================================================================//
// SECTION: Store
// ============================================================================//

/// `SQLite`-backed translation store with WAL support.
#[derive(Clone)]
pub struct SqliteTranslationStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTranslationStore {
    /// Opens an `SQLite`-backed translation store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Reads the text for a pair.
    fn get_text(
        &self,
        key: &TranslationKey,
        locale: &LocaleCode,
    ) -> Result<Option<String>, SqliteStoreError> {
        let guard = self.lock()?;
        let text = guard
            .query_row(
                "SELECT text FROM translations WHERE translation_key = ?1 AND locale = ?2",
                params![key.as_str(), locale.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        drop(guard);
        Ok(text)
    }

    /// Writes entries inside one transaction.
    fn upsert_entries(&self, entries: &[TranslationEntry]) -> Result<(), SqliteStoreError> {
        for entry in entries {
            check_text_size(entry)?;
        }
        let updated_at = unix_millis();
        let mut guard = self.lock()?;
        let tx = guard.transaction()?;
        {
            let mut statement = tx.prepare_cached(
                "INSERT INTO translations (translation_key, locale, text, updated_at) VALUES (?1, \
                 ?2, ?3, ?4) ON CONFLICT(translation_key, locale) DO UPDATE SET text = \
                 excluded.text, updated_at = excluded.updated_at",
            )?;
            for entry in entries {
                statement.execute(params![
                    entry.key.as_str(),
                    entry.locale.as_str(),
                    entry.text,
                    updated_at
                ])?;
            }
        }
        tx.commit()?;
        drop(guard);
        Ok(())
    }

    /// Deletes a pair, returning whether a row existed.
    fn delete_entry(
        &self,
        key: &TranslationKey,
        locale: &LocaleCode,
    ) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        let removed = guard.execute(
            "DELETE FROM translations WHERE translation_key = ?1 AND locale = ?2",
            params![key.as_str(), locale.as_str()],
        )?;
        drop(guard);
        Ok(removed > 0)
    }

    /// Queries entries matching a filter.
    fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, SqliteStoreError> {
        let limit = match filter.limit {
            Some(limit) => i64::try_from(limit)
                .map_err(|_| SqliteStoreError::Invalid("limit too large".to_string()))?,
            None => -1,
        };
        let offset = i64::try_from(filter.offset)
            .map_err(|_| SqliteStoreError::Invalid("offset too large".to_string()))?;
        let locale = filter.locale.as_ref().map(LocaleCode::as_str);
        let prefix = filter.key_prefix.as_deref();
        let guard = self.lock()?;
        let mut statement = guard.prepare_cached(
            "SELECT translation_key, locale, text FROM translations WHERE (?1 IS NULL OR locale = \
             ?1) AND (?2 IS NULL OR substr(translation_key, 1, length(?2)) = ?2) ORDER BY \
             translation_key, locale LIMIT ?3 OFFSET ?4",
        )?;
        let rows = statement.query_map(params![locale, prefix, limit, offset], |row| {
            let key: String = row.get(0)?;
            let locale: String = row.get(1)?;
            let text: String = row.get(2)?;
            Ok(TranslationEntry::new(key, locale, text))
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        drop(statement);
        drop(guard);
        Ok(entries)
    }
}

impl TranslationStore for SqliteTranslationStore {
    fn get(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<Option<String>, StoreError> {
        self.get_text(key, locale).map_err(StoreError::from)
    }

    fn upsert(&self, entry: &TranslationEntry) -> Result<(), StoreError> {
        self.upsert_entries(std::slice::from_ref(entry)).map_err(StoreError::from)
    }

    fn upsert_many(&self, entries: &[TranslationEntry]) -> Result<(), StoreError> {
        self.upsert_entries(entries).map_err(StoreError::from)
    }

    fn remove(&self, key: &TranslationKey, locale: &LocaleCode) -> Result<bool, StoreError> {
        self.delete_entry(key, locale).map_err(StoreError::from)
    }

    fn list(&self, filter: &EntryFilter) -> Result<Vec<TranslationEntry>, StoreError> {
        self.list_entries(filter).map_err(StoreError::from)
    }
}

// ============================================================================//
// SECTION: Helpers
// ============================================================================//

/// Rejects texts larger than the entry limit.
fn check_text_size(entry: &TranslationEntry) -> Result<(), SqliteStoreError> {
    if entry.text.len() > MAX_TEXT_BYTES {
        return Err(SqliteStoreError::TooLarge {
            max_bytes: MAX_TEXT_BYTES,
            actual_bytes: entry.text.len(),
        });
    }
    Ok(())
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must be non-empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))?;
    connection.busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction()?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS translations (
                    translation_key TEXT NOT NULL,
                    locale TEXT NOT NULL,
                    text TEXT NOT NULL,
                    updated_at INTEGER NOT NULL,
                    PRIMARY KEY (translation_key, locale)
                );
                CREATE INDEX IF NOT EXISTS idx_translations_locale
                    ON translations (locale);",
            )?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit()?;
    Ok(())
}

/// Returns the current unix epoch in milliseconds.
fn unix_millis() -> i64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
