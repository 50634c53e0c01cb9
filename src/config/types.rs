//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{ArgGroup, Parser, ValueEnum};

use crate::config::constants::DNS_TIMEOUT_SECS;
use crate::error_handling::SquashError;
use crate::spf::Qualifier;
use crate::{SpfSource, SquashRequest};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
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
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the squashed policy is written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One character-string per line
    Plain,
    /// All character-strings on one line, each double-quoted (zone-file ready)
    Quoted,
    /// The full squash report as JSON
    Json,
}

/// Command-line options and configuration.
///
/// Exactly one SPF source must be given: `--origin-spf` looks the starting
/// record up in DNS, `--realspf` uses a literal record.
///
/// # Examples
///
/// ```bash
/// # Flatten the record published at example.com
/// spf_squash --domain example.com --origin-spf example.com
///
/// # Flatten a draft record with a hard-fail trailing all
/// spf_squash --domain example.com --realspf "v=spf1 include:_spf.google.com mx -all" --qualifier=-
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spf_squash",
    about = "Flattens an SPF record into ip4/ip6 terms that need no further DNS lookups.",
    group(ArgGroup::new("source").required(true).args(["origin_spf", "realspf"]))
)]
pub struct Config {
    /// Domain that bare `a` and `mx` mechanisms resolve against
    #[arg(long)]
    pub domain: String,

    /// Domain whose published SPF record is the starting point
    #[arg(long)]
    pub origin_spf: Option<String>,

    /// Literal SPF record to start from (skips the initial TXT lookup)
    #[arg(long)]
    pub realspf: Option<String>,

    /// Qualifier of the synthesized trailing `all`: one of + ? ~ -
    #[arg(long, default_value = "~", allow_hyphen_values = true)]
    pub qualifier: Qualifier,

    /// Output format: plain|quoted|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// Use the system resolver configuration (resolv.conf) instead of the built-in defaults
    #[arg(long)]
    pub system_resolver: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            origin_spf: None,
            realspf: None,
            qualifier: Qualifier::SoftFail,
            format: OutputFormat::Plain,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            system_resolver: false,
        }
    }
}

impl Config {
    /// Builds the library-level squash request from the CLI options.
    ///
    /// # Errors
    ///
    /// Returns `SquashError::MissingSource` when neither SPF source is set and
    /// `SquashError::InvalidDomain` when the domain or origin is blank.
    pub fn to_request(&self) -> Result<SquashRequest, SquashError> {
        let source = match (&self.origin_spf, &self.realspf) {
            (Some(origin), _) => SpfSource::Origin(origin.clone()),
            (None, Some(record)) => SpfSource::Literal(record.clone()),
            (None, None) => return Err(SquashError::MissingSource),
        };
        SquashRequest::new(&self.domain, source, self.qualifier)
    }
}
