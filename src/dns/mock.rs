//! In-memory resolver for unit tests.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Mutex;

use super::resolver::{DnsLookup, DnsRecord, LookupOutcome, QueryType};

/// Serves canned answers and records every query it receives.
///
/// Names without an entry answer `NotFound`.
#[derive(Default)]
pub struct MockResolver {
    answers: HashMap<(String, QueryType), LookupOutcome>,
    queries: Mutex<Vec<(String, QueryType)>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a TXT answer; each string is one TXT RR in presentation form.
    pub fn add_txt(&mut self, name: &str, txts: &[&str]) -> &mut Self {
        let records = txts.iter().map(|t| DnsRecord::Txt(t.to_string())).collect();
        self.set(name, QueryType::Txt, LookupOutcome::Records(records))
    }

    /// Adds a single-string SPF TXT answer, quoting it like a real resolver would.
    pub fn add_spf(&mut self, name: &str, spf: &str) -> &mut Self {
        let quoted = format!("\"{spf}\"");
        self.add_txt(name, &[quoted.as_str()])
    }

    pub fn add_a(&mut self, name: &str, addrs: &[Ipv4Addr]) -> &mut Self {
        let records = addrs.iter().map(|a| DnsRecord::A(*a)).collect();
        self.set(name, QueryType::A, LookupOutcome::Records(records))
    }

    pub fn add_aaaa(&mut self, name: &str, addrs: &[Ipv6Addr]) -> &mut Self {
        let records = addrs.iter().map(|a| DnsRecord::Aaaa(*a)).collect();
        self.set(name, QueryType::Aaaa, LookupOutcome::Records(records))
    }

    pub fn add_mx(&mut self, name: &str, exchanges: &[(u16, &str)]) -> &mut Self {
        let records = exchanges
            .iter()
            .map(|(preference, exchange)| DnsRecord::Mx {
                preference: *preference,
                exchange: exchange.to_string(),
            })
            .collect();
        self.set(name, QueryType::Mx, LookupOutcome::Records(records))
    }

    pub fn fail(&mut self, name: &str, query: QueryType) -> &mut Self {
        self.set(name, query, LookupOutcome::Failed("timed out".to_string()))
    }

    fn set(&mut self, name: &str, query: QueryType, outcome: LookupOutcome) -> &mut Self {
        self.answers.insert((name.to_string(), query), outcome);
        self
    }

    /// Every query issued so far, in order.
    pub fn queries(&self) -> Vec<(String, QueryType)> {
        self.queries.lock().unwrap().clone()
    }
}

impl DnsLookup for MockResolver {
    async fn query(&self, name: &str, query: QueryType) -> LookupOutcome {
        self.queries.lock().unwrap().push((name.to_string(), query));
        self.answers
            .get(&(name.to_string(), query))
            .cloned()
            .unwrap_or(LookupOutcome::NotFound)
    }
}
