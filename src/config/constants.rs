//! Configuration constants.
//!
//! This module defines the limits and resolver parameters used throughout the
//! application.

// DNS wire limits
/// Maximum length of a single DNS TXT character-string in bytes.
/// Every chunk emitted by the record chunker must fit within this limit.
pub const TXT_MAX_LEN: usize = 255;

/// Version token that opens every SPF record and the first emitted chunk.
pub const SPF_VERSION: &str = "v=spf1";

/// RFC 7208 §4.6.4 ceiling on DNS-querying terms during SPF evaluation.
/// Only used for diagnostics; exceeding it while squashing is not an error.
pub const RFC_LOOKUP_LIMIT: usize = 10;

// Resolver behaviour
/// DNS query timeout in seconds
/// Deep include chains issue many sequential queries, so fail fast on each one
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Attempts per query before the resolver reports a failure
pub const DNS_ATTEMPTS: usize = 2;
