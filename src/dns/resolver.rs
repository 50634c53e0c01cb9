//! The resolver adapter contract.
//!
//! The flattener only ever asks "give me the TXT/A/AAAA/MX records for this
//! name". Anything that can answer that question implements [`DnsLookup`].

use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr};

use strum_macros::{Display, EnumIter};

/// Record types the flattener queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QueryType {
    /// Text records (SPF policies)
    #[strum(serialize = "TXT")]
    Txt,
    /// IPv4 addresses
    #[strum(serialize = "A")]
    A,
    /// IPv6 addresses
    #[strum(serialize = "AAAA")]
    Aaaa,
    /// Mail exchangers
    #[strum(serialize = "MX")]
    Mx,
}

/// One typed answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsRecord {
    /// A TXT RR in presentation form: each character-string double-quoted,
    /// separated by a single space.
    Txt(String),
    /// An A record
    A(Ipv4Addr),
    /// An AAAA record
    Aaaa(Ipv6Addr),
    /// An MX record
    Mx {
        /// Lower is preferred
        preference: u16,
        /// Exchange host name
        exchange: String,
    },
}

/// Result of a single query.
///
/// Lookups never raise: a missing name and a broken resolver are both
/// ordinary outcomes the caller pattern-matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The query succeeded
    Records(Vec<DnsRecord>),
    /// NXDOMAIN or no data of the requested type
    NotFound,
    /// Timeout, SERVFAIL, network error
    Failed(String),
}

impl LookupOutcome {
    /// Returns the records, or an empty vector for `NotFound` and `Failed`.
    pub fn into_records(self) -> Vec<DnsRecord> {
        match self {
            LookupOutcome::Records(records) => records,
            LookupOutcome::NotFound | LookupOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Answers typed DNS queries.
///
/// Implementations must map every failure to [`LookupOutcome::NotFound`] or
/// [`LookupOutcome::Failed`]; they never panic or return early errors.
pub trait DnsLookup {
    /// Queries `name` for records of type `query`.
    fn query(&self, name: &str, query: QueryType) -> impl Future<Output = LookupOutcome> + Send;
}

