//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::constants::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_PACE_MS, DEFAULT_VERBOSITY, INPUT_EXTENSION,
    MAX_PACE_MS, MAX_VERBOSITY, OUTPUT_SUFFIX, REQUEST_TIMEOUT_SECS,
};
use crate::validate::{IntRange, InvalidArgument};

/// Logging level for the application.
///
/// Controls the verbosity of diagnostic log output, from most restrictive
/// (Error) to most verbose (Trace). Used with the `--log-level` CLI option.
/// Distinct from the track logger's `--verbosity`, which gates user-facing
/// track output.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how diagnostic log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options except the input file have defaults and can be overridden via
/// command-line flags.
///
/// # Examples
///
/// ```bash
/// # Basic usage (key from ELEVATION_API_KEY or .env)
/// depth_finder track
///
/// # Key on the command line, slower pacing
/// depth_finder track.txt AIza... --pace-ms 2000
///
/// # Mirror every track message into a file
/// depth_finder track --track-log run.log --verbosity 1
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "depth_finder",
    about = "Appends elevation data to GPS track files."
)]
pub struct Config {
    /// Track file to read (base name; a trailing `.txt` is accepted)
    #[arg(value_parser)]
    pub input: PathBuf,

    /// Elevation API key (falls back to the ELEVATION_API_KEY environment variable)
    #[arg(value_parser)]
    pub api_key: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Elevation API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Delay between consecutive API requests in milliseconds
    #[arg(long, value_parser = parse_pace_ms, default_value_t = DEFAULT_PACE_MS)]
    pub pace_ms: u64,

    /// Track logger verbosity: 0 shows only errors, 3 shows everything
    #[arg(long, value_parser = parse_verbosity, default_value_t = DEFAULT_VERBOSITY)]
    pub verbosity: u8,

    /// File receiving every track logger message regardless of verbosity
    #[arg(long, value_parser)]
    pub track_log: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

impl Config {
    /// Path of the input track file: `<base>.txt`.
    pub fn input_path(&self) -> PathBuf {
        self.base().with_extension(INPUT_EXTENSION)
    }

    /// Path of the augmented output file: `<base>_depth.txt`.
    ///
    /// Written next to the input file; any existing file is overwritten.
    pub fn output_path(&self) -> PathBuf {
        let base = self.base();
        let stem = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        base.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{INPUT_EXTENSION}"))
    }

    /// Resolves the API key: the positional argument wins, then the
    /// `ELEVATION_API_KEY` environment variable. Empty values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
    }

    // The positional argument with any `.txt` extension stripped.
    fn base(&self) -> PathBuf {
        if self
            .input
            .extension()
            .is_some_and(|ext| ext == INPUT_EXTENSION)
        {
            self.input.with_extension("")
        } else {
            self.input.clone()
        }
    }
}

/// clap value parser for `--pace-ms`, bounded to [0, 60000].
fn parse_pace_ms(raw: &str) -> Result<u64, InvalidArgument> {
    IntRange::between(0, MAX_PACE_MS).parse(raw).map(|v| v as u64)
}

/// clap value parser for `--verbosity`, bounded to [0, 3].
fn parse_verbosity(raw: &str) -> Result<u8, InvalidArgument> {
    IntRange::between(0, MAX_VERBOSITY).parse(raw).map(|v| v as u8)
}
