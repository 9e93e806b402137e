// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::providers::GoogleTranslate;
use crate::terminology::TermTable;
use crate::translation_service::TranslationService;

mod app_config;
mod errors;
mod extraction;
mod language_utils;
mod providers;
mod terminology;
mod translation_service;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output format for translation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Print only the final translated text
    Text,
    /// Print the full audit trail as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "termlock", version, about = "Machine translation with controllable terminology")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a single text with terminology control
    Translate(TranslateArgs),

    /// Translate every non-empty line of a file as a batch
    Batch(BatchArgs),

    /// Show the loaded terminology table and its counts
    Terms(TermsArgs),

    /// Write a starter terminology CSV file
    Sample {
        /// Output file path
        #[arg(short, long, default_value = "sample_terminology.csv")]
        output: PathBuf,
    },

    /// Generate shell completions for termlock
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by the translate and batch commands
#[derive(Parser, Debug)]
struct CommonArgs {
    /// Source language code
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target_language: Option<String>,

    /// Path to a user terminology file (CSV/TSV)
    #[arg(long)]
    terminology: Option<PathBuf>,

    /// Disable the builtin dictionary for the target language
    #[arg(long)]
    no_builtin: bool,

    /// Translate directly instead of through the pivot language
    #[arg(long)]
    no_pivot: bool,

    /// Pivot language code
    #[arg(long)]
    pivot_language: Option<String>,

    /// Use the degraded keyword extraction strategy (single words only)
    #[arg(long)]
    keyword_fallback: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to the config file
    #[arg(short, long, default_value = "termlock.conf.json", env = "TERMLOCK_CONFIG")]
    config_path: String,

    /// Log level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Text to translate
    text: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input file with one text per line
    input: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct TermsArgs {
    #[command(flatten)]
    common: CommonArgs,
}

/// Custom logger writing colored, timestamped lines to stderr.
///
/// Filtering is driven by `log::max_level()` so a later `-l debug` flag
/// takes effect without re-installing the logger.
struct CustomLogger;

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default; raised or lowered per command flag after parsing
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termlock", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => run_translate(args).await,
        Commands::Batch(args) => run_batch(args).await,
        Commands::Terms(args) => run_terms(args),
        Commands::Sample { output } => run_sample(&output),
    }
}

/// Load the config file, creating a default one on first run
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Apply command-line overrides on top of the file config
fn effective_config(common: &CommonArgs) -> Result<Config> {
    if let Some(level) = common.log_level {
        log::set_max_level(level.into());
    }

    let mut config = load_or_create_config(&common.config_path)?;
    if let Some(source) = &common.source_language {
        config.source_language = source.clone();
    }
    if let Some(target) = &common.target_language {
        config.target_language = target.clone();
    }
    if let Some(pivot) = &common.pivot_language {
        config.pivot.language = pivot.clone();
    }
    if common.no_pivot {
        config.pivot.enabled = false;
    }
    if common.no_builtin {
        config.terminology.use_builtin = false;
    }
    if let Some(path) = &common.terminology {
        config.terminology.user_file = Some(path.clone());
    }
    if common.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }
    config.validate()?;
    Ok(config)
}

/// Build the session service against the real engine
fn build_service(config: Config, keyword_fallback: bool) -> Result<TranslationService> {
    let provider = GoogleTranslate::with_retries(
        config.engine.timeout_secs,
        config.engine.max_retries,
        config.engine.backoff_base_ms,
    );
    let (mut service, diagnostics) = TranslationService::new(config, Box::new(provider))?;
    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }
    if keyword_fallback {
        info!("Using keyword fallback extraction");
        service.use_keyword_fallback();
    }
    Ok(service)
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = effective_config(&args.common)?;
    let service = build_service(config, args.common.keyword_fallback)?;

    let result = service.translate(&args.text).await?;
    if !result.missed_placeholders.is_empty() {
        warn!(
            "{} of {} placeholder(s) did not survive translation",
            result.missed_placeholders.len(),
            result.replacements_count
        );
    }

    match args.common.format {
        OutputFormat::Text => println!("{}", result.text),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

async fn run_batch(args: BatchArgs) -> Result<()> {
    let config = effective_config(&args.common)?;
    let service = build_service(config, args.common.keyword_fallback)?;

    let content = std::fs::read_to_string(&args.input)
        .context(format!("Failed to read input file: {}", args.input.display()))?;
    let texts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let progress = ProgressBar::new(texts.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results = service
        .translate_batch(&texts, |done, _| progress.set_position(done as u64))
        .await;
    progress.finish_and_clear();

    let failures = results.iter().filter(|r| r.error.is_some()).count();
    if failures > 0 {
        warn!("{} of {} item(s) failed", failures, results.len());
    }

    match args.common.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => {
            for item in &results {
                match (&item.result, &item.error) {
                    (Some(result), _) => println!("{}", result.text),
                    (None, Some(error)) => println!("ERROR: {}", error),
                    (None, None) => {}
                }
            }
        }
    }
    Ok(())
}

fn run_terms(args: TermsArgs) -> Result<()> {
    let config = effective_config(&args.common)?;
    let load = TermTable::load(
        &config.target_language,
        config.terminology.user_file.as_deref(),
        config.terminology.use_builtin,
    );
    for diagnostic in &load.diagnostics {
        warn!("{}", diagnostic);
    }

    let counts = load.table.counts();
    let mut entries: Vec<_> = load
        .table
        .entries()
        .map(|(key, term)| {
            serde_json::json!({
                "term": key,
                "translation": term.translation,
                "provenance": term.provenance.to_string(),
            })
        })
        .collect();
    entries.sort_by_key(|e| e["term"].as_str().unwrap_or_default().to_string());

    let listing = serde_json::json!({
        "target_language": config.target_language,
        "counts": counts,
        "terms": entries,
    });
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn run_sample(output: &Path) -> Result<()> {
    let sample = "\
text,text_translated
cocoa,kookoo
export market,amannɔne dwam
farmer,okuafo
";
    std::fs::write(output, sample)
        .context(format!("Failed to write sample file: {}", output.display()))?;
    info!("Wrote sample terminology to {}", output.display());
    Ok(())
}
