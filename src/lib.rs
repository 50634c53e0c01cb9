//! spf_squash library: SPF record flattening
//!
//! This library resolves the DNS-dependent mechanisms of an SPF policy
//! (`include`, `redirect`, `a`, `mx`) into literal `ip4:`/`ip6:` terms,
//! deduplicates them and packs the result into TXT character-strings of at
//! most 255 bytes. The flattened record needs no further DNS lookups at
//! evaluation time, which keeps large policies under the RFC 7208 limit of
//! ten lookups.
//!
//! # Example
//!
//! ```no_run
//! use spf_squash::{Config, run_squash};
//! use tokio;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     origin_spf: Some("example.com".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_squash(&config).await?;
//! for record in &report.records {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;
pub mod spf;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{InitializationError, ResolutionStats, SquashError, WarningType};
pub use run::{run_squash, squash, SpfSource, SquashReport, SquashRequest};

// Internal run module (contains the top-level squash pipeline)
mod run {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use serde::Serialize;
    use strum::IntoEnumIterator;

    use crate::config::{Config, OutputFormat, RFC_LOOKUP_LIMIT};
    use crate::dns::DnsLookup;
    use crate::error_handling::{SquashError, WarningType};
    use crate::initialization::init_resolver;
    use crate::spf::{
        normalize_domain, spf_record, to_zone_rdata, FlattenState, Flattener, Qualifier,
        SquashedPolicy,
    };

    /// Where the starting SPF record comes from.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SpfSource {
        /// Look up the SPF record published at this domain
        Origin(String),
        /// Use this literal record (TXT presentation form is accepted)
        Literal(String),
    }

    /// A validated squash request.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SquashRequest {
        /// Normalized top-level domain; bare `a`/`mx` resolve against it
        pub domain: String,
        /// Starting record
        pub source: SpfSource,
        /// Qualifier of the synthesized trailing `all`
        pub qualifier: Qualifier,
    }

    impl SquashRequest {
        /// Validates and normalizes a request.
        ///
        /// # Errors
        ///
        /// Returns `SquashError::InvalidDomain` for a blank domain or origin and
        /// `SquashError::MissingSource` for a blank literal record.
        pub fn new(
            domain: &str,
            source: SpfSource,
            qualifier: Qualifier,
        ) -> Result<Self, SquashError> {
            let normalized = normalize_domain(domain);
            if normalized.is_empty() {
                return Err(SquashError::InvalidDomain(domain.to_string()));
            }

            let source = match source {
                SpfSource::Origin(origin) => {
                    let origin_normalized = normalize_domain(&origin);
                    if origin_normalized.is_empty() {
                        return Err(SquashError::InvalidDomain(origin));
                    }
                    SpfSource::Origin(origin_normalized)
                }
                SpfSource::Literal(record) => {
                    if record.trim().is_empty() {
                        return Err(SquashError::MissingSource);
                    }
                    SpfSource::Literal(record)
                }
            };

            Ok(Self {
                domain: normalized,
                source,
                qualifier,
            })
        }
    }

    /// Results of a squash.
    ///
    /// Contains the packed record and the bookkeeping gathered while
    /// flattening it.
    #[derive(Debug, Clone, Serialize)]
    pub struct SquashReport {
        /// Top-level domain the record was squashed for
        pub domain: String,
        /// TXT character-strings, in order; concatenated they form the record
        pub records: Vec<String>,
        /// Deduplicated terms, trailing `all` included
        pub terms: Vec<String>,
        /// DNS-querying operations performed
        pub lookups: usize,
        /// Non-zero warning counters keyed by warning name
        pub warnings: BTreeMap<String, usize>,
    }

    impl SquashReport {
        /// Renders the report for stdout.
        ///
        /// # Errors
        ///
        /// Returns an error only if JSON serialization fails.
        pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
            match format {
                OutputFormat::Plain => Ok(self.records.join("\n")),
                OutputFormat::Quoted => Ok(to_zone_rdata(&self.records)),
                OutputFormat::Json => serde_json::to_string_pretty(self),
            }
        }
    }

    /// Flattens, deduplicates and packs the SPF policy described by `request`.
    ///
    /// DNS problems never fail a squash: missing records, failed queries and
    /// cycles are logged, counted in the report's warnings and the affected
    /// terms dropped.
    ///
    /// # Errors
    ///
    /// Returns `SquashError::TermTooLong` if a single term cannot fit in a TXT
    /// character-string.
    pub async fn squash<R: DnsLookup + Sync>(
        resolver: &R,
        request: &SquashRequest,
    ) -> Result<SquashReport, SquashError> {
        let flattener = Flattener::new(resolver, &request.domain);
        let mut state = FlattenState::new();
        info!("Squashing SPF policy for {}", flattener.domain());

        let flattened = match &request.source {
            SpfSource::Origin(origin) => {
                flattener
                    .flatten(origin, Qualifier::Pass, &mut state)
                    .await
            }
            SpfSource::Literal(record) => {
                flattener
                    .flatten_record(record, Qualifier::Pass, &mut state)
                    .await
            }
        };

        info!(
            "Total DNS lookups: {} across {} domain(s)",
            state.lookups(),
            state.visited().len()
        );
        if state.lookups() > RFC_LOOKUP_LIMIT {
            warn!(
                "Published policy needs {} DNS lookups, above the RFC 7208 limit of {}",
                state.lookups(),
                RFC_LOOKUP_LIMIT
            );
            state.record_warning(WarningType::LookupLimitExceeded);
        }

        let policy = SquashedPolicy::new(flattened, request.qualifier);
        let records = spf_record(&policy)?;
        state.stats().log_summary();

        let warnings = WarningType::iter()
            .map(|w| (w.as_str().to_string(), state.stats().get_warning_count(w)))
            .filter(|(_, count)| *count > 0)
            .collect();

        Ok(SquashReport {
            domain: request.domain.clone(),
            records,
            terms: policy.to_terms(),
            lookups: state.lookups(),
            warnings,
        })
    }

    /// Runs a squash with the provided configuration.
    ///
    /// This is the main entry point for the library. It validates the
    /// configuration, builds the DNS resolver and squashes the policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the resolver cannot be
    /// initialized or a term is too long to pack.
    pub async fn run_squash(config: &Config) -> Result<SquashReport> {
        let request = config.to_request().context("Invalid squash request")?;
        let resolver = init_resolver(
            Duration::from_secs(config.dns_timeout_secs),
            config.system_resolver,
        )
        .context("Failed to initialize DNS resolver")?;

        let report = squash(resolver.as_ref(), &request)
            .await
            .with_context(|| format!("Failed to squash SPF policy for {}", request.domain))?;

        info!(
            "Squashed {} terms into {} TXT string(s) for {}",
            report.terms.len(),
            report.records.len(),
            report.domain
        );
        Ok(report)
    }

}
