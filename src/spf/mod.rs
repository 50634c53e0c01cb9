//! SPF flattening pipeline.
//!
//! This module turns a published SPF policy into a self-contained one:
//! - Term classification (qualifier, mechanism kind, value)
//! - Recursive flattening of include/redirect/a/mx into ip4/ip6 terms
//! - Deduplication into a sorted set with a synthesized trailing `all`
//! - Packing into 255-byte TXT character-strings

mod chunk;
mod dedup;
mod flatten;
mod term;

// Re-export public API
pub use chunk::{chunk_terms, spf_record, to_zone_rdata};
pub use dedup::{dedup_terms, SquashedPolicy};
pub use flatten::{ip4_term, ip6_term, FlattenResult, FlattenState, Flattener};
pub use term::{classify, HostSpec, MechanismKind, Qualifier, Term};

/// Normalizes a domain name for lookups and the visited set: trimmed,
/// lowercased, without the trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
