//! DNS record queries (TXT, A, AAAA, MX) through `hickory-resolver`.
//!
//! This module implements [`DnsLookup`] for the Tokio resolver and converts
//! hickory's `RData` into the adapter's typed [`DnsRecord`]s.

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioResolver;

use super::resolver::{DnsLookup, DnsRecord, LookupOutcome, QueryType};

impl DnsLookup for TokioResolver {
    async fn query(&self, name: &str, query: QueryType) -> LookupOutcome {
        let record_type = match query {
            QueryType::Txt => RecordType::TXT,
            QueryType::A => RecordType::A,
            QueryType::Aaaa => RecordType::AAAA,
            QueryType::Mx => RecordType::MX,
        };

        match self.lookup(name, record_type).await {
            Ok(lookup) => {
                let mut records: Vec<DnsRecord> = lookup.iter().filter_map(convert_rdata).collect();
                if query == QueryType::Mx {
                    sort_mx_by_preference(&mut records);
                }
                LookupOutcome::Records(records)
            }
            Err(e) => {
                let error_msg = e.to_string();
                // "no records found" is expected for names without this record type
                if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
                    LookupOutcome::NotFound
                } else {
                    if error_msg.contains("timeout") || error_msg.contains("timed out") {
                        log::debug!("{query} record lookup timed out for {name}: {e}");
                    } else {
                        log::debug!("Failed to lookup {query} records for {name}: {e}");
                    }
                    LookupOutcome::Failed(error_msg)
                }
            }
        }
    }
}

/// Maps one hickory `RData` to a typed record, skipping types we never ask for
/// (a CNAME in the answer chain, for instance).
fn convert_rdata(rdata: &RData) -> Option<DnsRecord> {
    match rdata {
        RData::TXT(txt) => {
            let segments: Vec<&[u8]> = txt.iter().map(|bytes| &bytes[..]).collect();
            Some(DnsRecord::Txt(render_txt_rdata(&segments)))
        }
        RData::A(a) => Some(DnsRecord::A(a.0)),
        RData::AAAA(aaaa) => Some(DnsRecord::Aaaa(aaaa.0)),
        RData::MX(mx) => Some(DnsRecord::Mx {
            preference: mx.preference(),
            exchange: mx.exchange().to_utf8(),
        }),
        _ => None,
    }
}

/// Renders TXT character-strings in presentation form.
///
/// Each segment is double-quoted and segments are separated by one space,
/// e.g. `"v=spf1 " "include:_spf.example.com " "~all"`. Embedded quotes and
/// backslashes are escaped. The TXT joiner turns this back into one logical
/// string.
pub fn render_txt_rdata(segments: &[&[u8]]) -> String {
    segments
        .iter()
        .map(|bytes| {
            let text = String::from_utf8_lossy(bytes)
                .replace('\\', "\\\\")
                .replace('"', "\\\"");
            format!("\"{text}\"")
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Sorts MX records by preference (lower = higher priority), keeping any
/// non-MX records in front in their original order.
pub fn sort_mx_by_preference(records: &mut [DnsRecord]) {
    records.sort_by_key(|record| match record {
        DnsRecord::Mx { preference, .. } => (1, *preference),
        _ => (0, 0),
    });
}
