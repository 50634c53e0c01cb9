//! DNS resolution and record querying.
//!
//! This module provides the resolver adapter the flattener talks to:
//! - A narrow query contract (`DnsLookup`) over TXT, A, AAAA and MX
//! - A typed lookup outcome instead of raised errors
//! - The `hickory-resolver` implementation used in production
//! - RFC 4408 §3.1.3 TXT character-string joining and SPF detection
//!
//! All operations are async and respect the resolver's configured timeouts.

mod records;
mod resolver;
mod txt;

#[cfg(test)]
pub(crate) mod mock;

// Re-export public API
pub use records::{render_txt_rdata, sort_mx_by_preference};
pub use resolver::{DnsLookup, DnsRecord, LookupOutcome, QueryType};
pub use txt::{is_spf_record, join_txt_strings};

#[cfg(test)]
mod tests;
