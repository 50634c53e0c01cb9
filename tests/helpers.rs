// Shared test helpers for squash integration tests.
//
// This module provides an in-memory zone that implements the public resolver
// contract, so the pipeline can be driven end to end without network access.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};

use spf_squash::dns::{DnsLookup, DnsRecord, LookupOutcome, QueryType};

/// A static zone answering TXT and A queries.
#[derive(Default)]
pub struct Zone {
    txt: HashMap<String, Vec<String>>,
    a: HashMap<String, Vec<Ipv4Addr>>,
    queries: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `spf` at `name` as a single quoted character-string.
    pub fn spf(mut self, name: &str, spf: &str) -> Self {
        self.txt
            .entry(name.to_string())
            .or_default()
            .push(format!("\"{spf}\""));
        self
    }

    pub fn a(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.a.entry(name.to_string()).or_default().push(addr);
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl DnsLookup for Zone {
    async fn query(&self, name: &str, query: QueryType) -> LookupOutcome {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let records: Vec<DnsRecord> = match query {
            QueryType::Txt => self
                .txt
                .get(name)
                .map(|txts| txts.iter().cloned().map(DnsRecord::Txt).collect())
                .unwrap_or_default(),
            QueryType::A => self
                .a
                .get(name)
                .map(|addrs| addrs.iter().copied().map(DnsRecord::A).collect())
                .unwrap_or_default(),
            QueryType::Aaaa | QueryType::Mx => Vec::new(),
        };

        if records.is_empty() {
            LookupOutcome::NotFound
        } else {
            LookupOutcome::Records(records)
        }
    }
}
