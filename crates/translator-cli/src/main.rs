// crates/translator-cli/src/main.rs
// ============================================================================
// Module: Translator CLI Entry Point
// Description: Command dispatcher for the translator server and store utilities.
// Purpose: Provide a localized CLI for serving and offline translation tasks.
// Dependencies: clap, translator-config, translator-core, translator-server, tokio.
// ============================================================================

//! ## Overview
//! The `translator` CLI starts the HTTP server and runs offline maintenance
//! commands directly against the configured store. All user-facing strings
//! are routed through the i18n catalog; diagnostics go through `tracing`.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use translator_cli::i18n::Locale;
use translator_cli::i18n::set_locale;
use translator_cli::t;
use translator_config::ServerAuthMode;
use translator_config::StoreType;
use translator_config::TranslatorConfig;
use translator_config::config_toml_example;
use translator_core::EntryFilter;
use translator_core::LocaleCode;
use translator_core::TranslationEntry;
use translator_core::TranslationKey;
use translator_core::TranslationServices;
use translator_server::TranslatorServer;
use translator_server::build_translation_store;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of an import file.
const MAX_IMPORT_BYTES: usize = 64 * 1024 * 1024;
/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "TRANSLATOR_LANG";
/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "TRANSLATOR_LOG";
/// Filter used when `TRANSLATOR_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "translator", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `TRANSLATOR_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the translator HTTP server.
    Serve(ConfigArgs),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Resolve one key with locale fallback.
    Get(GetCommand),
    /// Insert or replace one translation.
    Insert(InsertCommand),
    /// Remove one translation.
    Remove(RemoveCommand),
    /// List stored translations.
    List(ListCommand),
    /// Export every translation as a JSON array.
    Export(ExportCommand),
    /// Import translations from a JSON array.
    Import(ImportCommand),
}

/// Config file selection shared by most commands.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Optional config file path (defaults to translator.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a translator configuration file.
    Validate(ConfigArgs),
    /// Print a canonical example configuration.
    Example,
}

/// Arguments for `get`.
#[derive(Args, Debug)]
struct GetCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// Translation key.
    #[arg(long, value_name = "KEY")]
    key: String,
    /// Requested locale (defaults to the configured default locale).
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
}

/// Arguments for `insert`.
#[derive(Args, Debug)]
struct InsertCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// Translation key.
    #[arg(long, value_name = "KEY")]
    key: String,
    /// Locale code.
    #[arg(long, value_name = "LOCALE")]
    locale: String,
    /// Translated text.
    #[arg(long, value_name = "TEXT")]
    text: String,
}

/// Arguments for `remove`.
#[derive(Args, Debug)]
struct RemoveCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// Translation key.
    #[arg(long, value_name = "KEY")]
    key: String,
    /// Locale code.
    #[arg(long, value_name = "LOCALE")]
    locale: String,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// Optional locale filter.
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
    /// Optional key prefix filter.
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,
    /// Optional page size.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
    /// Entries to skip.
    #[arg(long, value_name = "N", default_value_t = 0)]
    offset: usize,
    /// Output format for listings.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `export`.
#[derive(Args, Debug)]
struct ExportCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// Output file (stdout when omitted).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Arguments for `import`.
#[derive(Args, Debug)]
struct ImportCommand {
    /// Config file selection.
    #[command(flatten)]
    location: ConfigArgs,
    /// JSON file holding an array of `{key, locale, text}` entries.
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
}

/// Output formats for listing commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// JSON array output.
    Json,
    /// Human-readable text output.
    Text,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// French.
    Fr,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Fr => Self::Fr,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    init_tracing()?;

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Get(command) => command_get(&command),
        Commands::Insert(command) => command_insert(&command),
        Commands::Remove(command) => command_remove(&command),
        Commands::List(command) => command_list(&command),
        Commands::Export(command) => command_export(&command),
        Commands::Import(command) => command_import(&command),
    }
}

/// Installs the stderr tracing subscriber filtered by `TRANSLATOR_LOG`.
fn init_tracing() -> CliResult<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ConfigArgs) -> CliResult<ExitCode> {
    let config = TranslatorConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("serve.config.load_failed", error = err)))?;
    warn_local_only(&config)?;
    let server = tokio::task::spawn_blocking(move || TranslatorServer::from_config(config))
        .await
        .map_err(|err| {
            CliError::new(t!("serve.init_failed", error = format!("init join failed: {err}")))
        })?
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    write_stderr_line(&t!("serve.listening", bind = server.bind_addr()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().await.map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Emits the local-only notice when no bearer auth is configured.
fn warn_local_only(config: &TranslatorConfig) -> CliResult<()> {
    if config.server.auth_mode() != ServerAuthMode::LocalOnly {
        return Ok(());
    }
    write_stderr_line(&t!("serve.warn.local_only_auth"))
        .map_err(|err| CliError::new(output_error("stderr", &err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigArgs) -> CliResult<ExitCode> {
    let _config = load_config(command)?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the canonical example configuration.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_bytes(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Translation Commands
// ============================================================================

/// Executes `get`.
fn command_get(command: &GetCommand) -> CliResult<ExitCode> {
    let services = open_services(&command.location)?;
    let key = TranslationKey::new(command.key.clone());
    let locale = command.locale.clone().map_or_else(
        || services.fetch.settings().default_locale.clone(),
        LocaleCode::new,
    );
    let resolved = services
        .fetch
        .fetch_one(&key, &locale)
        .map_err(|err| CliError::new(t!("translation.get.failed", error = err)))?
        .ok_or_else(|| {
            CliError::new(t!("translation.get.not_found", key = key, locale = locale))
        })?;
    if resolved.locale != locale {
        write_stderr_line(&t!(
            "translation.get.fallback",
            key = key,
            resolved = resolved.locale,
            locale = locale
        ))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    write_stdout_line(&resolved.text).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `insert`.
fn command_insert(command: &InsertCommand) -> CliResult<ExitCode> {
    let services = open_services(&command.location)?;
    let key = TranslationKey::new(command.key.clone());
    let locale = LocaleCode::new(command.locale.clone());
    services
        .insert
        .insert(&key, &locale, &command.text)
        .map_err(|err| CliError::new(t!("translation.insert.failed", error = err)))?;
    write_stdout_line(&t!("translation.insert.ok", key = key, locale = locale))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `remove`.
fn command_remove(command: &RemoveCommand) -> CliResult<ExitCode> {
    let services = open_services(&command.location)?;
    let key = TranslationKey::new(command.key.clone());
    let locale = LocaleCode::new(command.locale.clone());
    services
        .admin
        .remove(&key, &locale)
        .map_err(|err| CliError::new(t!("translation.remove.failed", error = err)))?;
    write_stdout_line(&t!("translation.remove.ok", key = key, locale = locale))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `list`.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let services = open_services(&command.location)?;
    let filter = EntryFilter {
        locale: command.locale.clone().map(LocaleCode::new),
        key_prefix: command.prefix.clone().filter(|prefix| !prefix.is_empty()),
        limit: command.limit,
        offset: command.offset,
    };
    let entries = services
        .admin
        .list(&filter)
        .map_err(|err| CliError::new(t!("translation.list.failed", error = err)))?;
    let output = match command.format {
        OutputFormat::Json => json_array_bytes(&entries)?,
        OutputFormat::Text => render_list_text(&entries).into_bytes(),
    };
    write_stdout_bytes(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `export`.
fn command_export(command: &ExportCommand) -> CliResult<ExitCode> {
    let services = open_services(&command.location)?;
    let entries = services
        .admin
        .export()
        .map_err(|err| CliError::new(t!("translation.export.failed", error = err)))?;
    let bytes = json_array_bytes(&entries)?;
    match &command.output {
        Some(path) => {
            fs::write(path, &bytes).map_err(|err| {
                CliError::new(t!(
                    "translation.export.write_failed",
                    path = path.display(),
                    error = err
                ))
            })?;
            write_stdout_line(&t!(
                "translation.export.ok",
                count = entries.len(),
                path = path.display()
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        None => {
            write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `import`.
fn command_import(command: &ImportCommand) -> CliResult<ExitCode> {
    let entries = read_import_entries(&command.input)?;
    let services = open_services(&command.location)?;
    let report = services
        .insert
        .import(&entries)
        .map_err(|err| CliError::new(t!("translation.import.failed", error = err)))?;
    let locales =
        report.locales.iter().map(LocaleCode::as_str).collect::<Vec<_>>().join(", ");
    write_stdout_line(&t!(
        "translation.import.ok",
        imported = report.imported,
        keys = report.keys,
        locales = locales
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Store Helpers
// ============================================================================

/// Loads and validates configuration for a command.
fn load_config(args: &ConfigArgs) -> CliResult<TranslatorConfig> {
    TranslatorConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Opens the configured store and wraps it in translation services.
///
/// The memory store is rejected: each invocation would start empty.
fn open_services(args: &ConfigArgs) -> CliResult<TranslationServices> {
    let config = load_config(args)?;
    if config.store.store_type == StoreType::Memory {
        return Err(CliError::new(t!("store.memory_offline")));
    }
    let store = build_translation_store(&config.store)
        .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
    tracing::debug!(store = ?config.store.store_type, "translation store opened");
    Ok(TranslationServices::new(store, config.i18n_settings()))
}

/// Renders entries as one text line each.
fn render_list_text(entries: &[TranslationEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", t!("translation.list.none"));
    }
    let mut output = String::new();
    for entry in entries {
        output.push_str(&t!(
            "translation.list.entry",
            key = entry.key,
            locale = entry.locale,
            text = entry.text
        ));
        output.push('\n');
    }
    output
}

/// Serializes entries as a pretty JSON array with a trailing newline.
fn json_array_bytes(entries: &[TranslationEntry]) -> CliResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(entries)
        .map_err(|err| CliError::new(t!("translation.export.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    Ok(bytes)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads and parses an import file.
fn read_import_entries(path: &Path) -> CliResult<Vec<TranslationEntry>> {
    let kind = t!("input.kind.import");
    let bytes = read_bytes_with_limit(path, MAX_IMPORT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = err
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
