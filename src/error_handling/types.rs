//! Error type definitions.
//!
//! This module defines the fatal error types and the non-fatal warning
//! categories used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Errors that abort a squash run.
///
/// Per-domain resolution problems never surface here; they are absorbed by
/// the flattener and counted as [`WarningType`]s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquashError {
    /// A single term cannot fit in any TXT character-string.
    #[error("term `{term}` is {len} bytes and cannot fit in a {max}-byte TXT character-string")]
    TermTooLong {
        /// The offending term
        term: String,
        /// Its length in bytes
        len: usize,
        /// The character-string limit
        max: usize,
    },

    /// A qualifier string is not one of `+ ? ~ -`.
    #[error("invalid qualifier `{0}`: expected one of + ? ~ -")]
    InvalidQualifier(String),

    /// The domain (or origin domain) is empty after normalization.
    #[error("invalid domain `{0}`")]
    InvalidDomain(String),

    /// Neither an origin domain nor a literal record was supplied.
    #[error("no SPF source given: set an origin domain or a literal record")]
    MissingSource,
}

/// Non-fatal conditions hit while flattening.
///
/// Each one degrades the flattened output (fewer terms or an unresolved
/// pass-through) rather than aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// A query returned NXDOMAIN or no data
    NoRecords,
    /// A query failed (timeout, SERVFAIL, network error)
    LookupFailure,
    /// An include/redirect target is already being expanded further up
    CycleDetected,
    /// An include/redirect target was already expanded through another path
    AlreadyExpanded,
    /// A deprecated `ptr` mechanism was passed through
    DeprecatedPtr,
    /// A mechanism could not be interpreted and was passed through
    MalformedMechanism,
    /// The squash needed more lookups than RFC 7208 allows at evaluation time
    LookupLimitExceeded,
}

impl std::fmt::Display for WarningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WarningType {
    /// Human-readable name, used in logs and report keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::NoRecords => "No records found",
            WarningType::LookupFailure => "DNS lookup failure",
            WarningType::CycleDetected => "Include/redirect cycle",
            WarningType::AlreadyExpanded => "Domain already expanded",
            WarningType::DeprecatedPtr => "Deprecated PTR mechanism",
            WarningType::MalformedMechanism => "Malformed mechanism",
            WarningType::LookupLimitExceeded => "Lookup limit exceeded",
        }
    }
}
