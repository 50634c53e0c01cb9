//! Recursive SPF flattening.
//!
//! Expands `include`, `redirect`, `a` and `mx` into `ip4:`/`ip6:` terms by
//! querying DNS one record at a time. Every per-domain problem (missing
//! record, failed query, cycle) is absorbed here and counted as a warning.

use std::collections::HashSet;
use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::pin::Pin;

use log::{debug, info, warn};

use crate::dns::{is_spf_record, join_txt_strings, DnsLookup, DnsRecord, LookupOutcome, QueryType};
use crate::error_handling::{ResolutionStats, WarningType};
use crate::spf::normalize_domain;
use crate::spf::term::{classify, HostSpec, MechanismKind, Qualifier, Term};

/// Flattened terms in traversal order, each rendered with its qualifier.
pub type FlattenResult = Vec<String>;

type FlattenFuture<'a> = Pin<Box<dyn Future<Output = FlattenResult> + Send + 'a>>;

/// Mutable context threaded through one squash.
///
/// `visited` holds every domain whose TXT record has been expanded; an
/// include/redirect pointing at one of them is skipped, which bounds the
/// recursion no matter how the published records are wired. `path` holds the
/// domains currently being expanded, outermost first: a target on the path is
/// a cycle, any other visited target was reached through a second include
/// path.
#[derive(Debug, Default)]
pub struct FlattenState {
    lookups: usize,
    visited: HashSet<String>,
    path: Vec<String>,
    stats: ResolutionStats,
}

impl FlattenState {
    /// Empty state: no lookups, nothing visited.
    pub fn new() -> Self {
        Self::default()
    }

    /// DNS-querying operations performed so far (including passed-through `ptr`).
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Whether `domain` (normalized) has already been expanded.
    pub fn has_visited(&self, domain: &str) -> bool {
        self.visited.contains(&normalize_domain(domain))
    }

    /// Every domain expanded so far, normalized.
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Warnings raised so far.
    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    /// Counts one DNS-querying operation.
    pub fn count_lookup(&mut self) {
        self.lookups += 1;
    }

    /// Counts one absorbed problem.
    pub fn record_warning(&mut self, warning: WarningType) {
        self.stats.increment_warning(warning);
    }
}

/// Whether the rest of a record still needs processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordFlow {
    Continue,
    Redirected,
}

/// Expands SPF records through a [`DnsLookup`] adapter.
///
/// Bare `a` and `mx` always resolve against `domain`, the top-level domain
/// being squashed, even inside an included record. Strict RFC 7208 would use
/// the included record's own domain instead.
pub struct Flattener<'r, R> {
    resolver: &'r R,
    domain: String,
}

impl<'r, R: DnsLookup + Sync> Flattener<'r, R> {
    /// Creates a flattener; `domain` is normalized.
    pub fn new(resolver: &'r R, domain: &str) -> Self {
        Self {
            resolver,
            domain: normalize_domain(domain),
        }
    }

    /// The top-level domain bare `a`/`mx` resolve against.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Looks up the TXT records of `domain` and flattens every SPF record found.
    ///
    /// Terms without an explicit qualifier take `qualifier`. Several SPF
    /// records on one domain are merged rather than rejected.
    pub fn flatten<'a>(
        &'a self,
        domain: &'a str,
        qualifier: Qualifier,
        state: &'a mut FlattenState,
    ) -> FlattenFuture<'a> {
        Box::pin(async move {
            let domain = normalize_domain(domain);
            state.visited.insert(domain.clone());
            state.path.push(domain.clone());
            info!("Looking up SPF records in {domain}");

            let mut terms = Vec::new();
            for txt in self.lookup_txt(&domain, state).await {
                let record = join_txt_strings(&txt);
                if !is_spf_record(&record) {
                    debug!("Skipping non-SPF TXT record for {domain}: {record}");
                    continue;
                }
                debug!("Processing SPF for {domain}: {record}");
                if self.expand_record(&record, qualifier, state, &mut terms).await
                    == RecordFlow::Redirected
                {
                    break;
                }
            }
            state.path.pop();
            terms
        })
    }

    /// Flattens a literal SPF record without looking it up first.
    ///
    /// The record may be in TXT presentation form (quoted character-strings).
    /// A string that is not an SPF record yields no terms.
    pub async fn flatten_record(
        &self,
        record: &str,
        qualifier: Qualifier,
        state: &mut FlattenState,
    ) -> FlattenResult {
        let record = join_txt_strings(record);
        let mut terms = Vec::new();
        if !is_spf_record(&record) {
            warn!("Ignoring record without a v=spf1 version token: {record}");
            return terms;
        }
        debug!("Processing SPF: {record}");
        self.expand_record(&record, qualifier, state, &mut terms).await;
        terms
    }

    async fn expand_record(
        &self,
        record: &str,
        ambient: Qualifier,
        state: &mut FlattenState,
        terms: &mut FlattenResult,
    ) -> RecordFlow {
        for raw in record.split_whitespace().skip(1) {
            let term = classify(raw, ambient);
            match term.kind {
                MechanismKind::Include | MechanismKind::Redirect => {
                    let target = term.target().unwrap_or_default();
                    if target.is_empty() || target.contains('%') {
                        warn!("Cannot resolve {term}, copying it unresolved");
                        state.record_warning(WarningType::MalformedMechanism);
                        terms.push(term.to_string());
                        continue;
                    }
                    if term.kind == MechanismKind::Redirect {
                        info!("Found \"{term}\" in SPF record");
                        let redirected = self.expand_target(target, term.qualifier, state).await;
                        terms.extend(redirected);
                        return RecordFlow::Redirected;
                    }
                    let included = self.expand_target(target, term.qualifier, state).await;
                    terms.extend(included);
                }
                MechanismKind::All => debug!("Ignoring mechanism {term}"),
                MechanismKind::A => terms.extend(self.expand_a(&term, state).await),
                MechanismKind::Mx => terms.extend(self.expand_mx(&term, state).await),
                MechanismKind::PtrDeprecated => {
                    warn!("Found deprecated PTR entry {term}");
                    state.count_lookup();
                    state.record_warning(WarningType::DeprecatedPtr);
                    terms.push(term.to_string());
                }
                MechanismKind::Literal => {
                    if term.value.is_empty() {
                        continue;
                    }
                    debug!("Copying element {term}");
                    terms.push(term.to_string());
                }
            }
        }
        RecordFlow::Continue
    }

    /// Recurses into an include/redirect target unless it was already expanded.
    async fn expand_target(
        &self,
        target: &str,
        qualifier: Qualifier,
        state: &mut FlattenState,
    ) -> FlattenResult {
        let target = normalize_domain(target);
        if state.path.contains(&target) {
            warn!("Skipping {target}: include/redirect cycle");
            state.record_warning(WarningType::CycleDetected);
            return Vec::new();
        }
        if state.visited.contains(&target) {
            warn!("Skipping {target}: already expanded through another include");
            state.record_warning(WarningType::AlreadyExpanded);
            return Vec::new();
        }
        self.flatten(&target, qualifier, state).await
    }

    async fn expand_a(&self, term: &Term, state: &mut FlattenState) -> FlattenResult {
        let Some(spec) = self.host_spec(term, state) else {
            return vec![term.to_string()];
        };
        let host = spec.domain.clone().unwrap_or_else(|| self.domain.clone());
        info!("Found \"{term}\" in SPF record, resolving {host}");
        self.resolve_host(&host, &spec, term.qualifier, state).await
    }

    /// Resolves MX exchanges to addresses; never emits an `mx:` term.
    async fn expand_mx(&self, term: &Term, state: &mut FlattenState) -> FlattenResult {
        let Some(spec) = self.host_spec(term, state) else {
            return vec![term.to_string()];
        };
        let host = spec.domain.clone().unwrap_or_else(|| self.domain.clone());
        info!("Found \"{term}\" in SPF record, resolving exchanges of {host}");

        let exchanges: Vec<String> = self
            .lookup(&host, QueryType::Mx, state)
            .await
            .into_iter()
            .filter_map(|record| match record {
                DnsRecord::Mx { exchange, .. } => Some(normalize_domain(&exchange)),
                _ => None,
            })
            .collect();

        let mut terms = Vec::new();
        for exchange in exchanges {
            // Null MX (RFC 7505) publishes "." as the exchange
            if exchange.is_empty() {
                debug!("Skipping null MX for {host}");
                continue;
            }
            terms.extend(self.resolve_host(&exchange, &spec, term.qualifier, state).await);
        }
        terms
    }

    fn host_spec(&self, term: &Term, state: &mut FlattenState) -> Option<HostSpec> {
        let spec = HostSpec::parse(&term.value);
        if spec.is_none() {
            warn!("Cannot parse {term}, copying it unresolved");
            state.record_warning(WarningType::MalformedMechanism);
        }
        spec
    }

    async fn resolve_host(
        &self,
        host: &str,
        spec: &HostSpec,
        qualifier: Qualifier,
        state: &mut FlattenState,
    ) -> FlattenResult {
        let prefix = qualifier.term_prefix();
        let mut terms = Vec::new();
        for record in self.lookup(host, QueryType::A, state).await {
            if let DnsRecord::A(addr) = record {
                terms.push(format!("{prefix}{}", ip4_term(addr, spec.ip4_prefix)));
            }
        }
        for record in self.lookup(host, QueryType::Aaaa, state).await {
            if let DnsRecord::Aaaa(addr) = record {
                terms.push(format!("{prefix}{}", ip6_term(addr, spec.ip6_prefix)));
            }
        }
        terms
    }

    async fn lookup_txt(&self, domain: &str, state: &mut FlattenState) -> Vec<String> {
        self.lookup(domain, QueryType::Txt, state)
            .await
            .into_iter()
            .filter_map(|record| match record {
                DnsRecord::Txt(txt) => Some(txt),
                _ => None,
            })
            .collect()
    }

    /// Issues one query, counting it and absorbing every failure.
    async fn lookup(
        &self,
        name: &str,
        query: QueryType,
        state: &mut FlattenState,
    ) -> Vec<DnsRecord> {
        debug!("Performing {query} record lookup for {name}");
        state.count_lookup();
        let outcome = self.resolver.query(name, query).await;
        match &outcome {
            LookupOutcome::Records(records) => {
                debug!("Found {} {query} record(s) for {name}", records.len());
            }
            LookupOutcome::NotFound => {
                warn!("No {query} record present for {name}");
                state.record_warning(WarningType::NoRecords);
            }
            LookupOutcome::Failed(reason) => {
                warn!("{query} record lookup for {name} failed: {reason}");
                state.record_warning(WarningType::LookupFailure);
            }
        }
        outcome.into_records()
    }
}

/// Renders an `ip4:` term, masking the address to `prefix` when it is shorter
/// than a host route.
pub fn ip4_term(addr: Ipv4Addr, prefix: Option<u8>) -> String {
    match prefix {
        Some(p) if p < 32 => {
            let mask = u32::MAX.checked_shl(32 - u32::from(p)).unwrap_or(0);
            format!("ip4:{}/{p}", Ipv4Addr::from(u32::from(addr) & mask))
        }
        _ => format!("ip4:{addr}"),
    }
}

/// Renders an `ip6:` term, masking the address to `prefix` when it is shorter
/// than a host route.
pub fn ip6_term(addr: Ipv6Addr, prefix: Option<u8>) -> String {
    match prefix {
        Some(p) if p < 128 => {
            let mask = u128::MAX.checked_shl(128 - u32::from(p)).unwrap_or(0);
            format!("ip6:{}/{p}", Ipv6Addr::from(u128::from(addr) & mask))
        }
        _ => format!("ip6:{addr}"),
    }
}
