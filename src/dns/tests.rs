//! DNS module tests.

use super::mock::MockResolver;
use super::*;
use std::net::Ipv4Addr;

#[test]
fn test_join_txt_strings_rejoins_split_mechanisms() {
    let joined = join_txt_strings("\"v=spf1 \" \"include:_spf.example.com \" \"~all\"");
    assert_eq!(joined, "v=spf1 include:_spf.example.com ~all");
}

#[test]
fn test_join_txt_strings_concatenates_without_separator() {
    // RFC 4408 §3.1.3: no space is inserted between character-strings
    let joined = join_txt_strings("\"v=spf1 ip4:192.0.2.1 inc\" \"lude:_spf.example.com -all\"");
    assert_eq!(joined, "v=spf1 ip4:192.0.2.1 include:_spf.example.com -all");
}

#[test]
fn test_join_txt_strings_collapses_whitespace() {
    let joined = join_txt_strings("\"v=spf1   ip4:192.0.2.1\t -all\"");
    assert_eq!(joined, "v=spf1 ip4:192.0.2.1 -all");
}

#[test]
fn test_join_txt_strings_keeps_leading_space_of_continuation() {
    // Continuation chunks written by the chunker start with a space
    let joined = join_txt_strings("\"v=spf1 ip4:192.0.2.1\" \" ip4:192.0.2.2 -all\"");
    assert_eq!(joined, "v=spf1 ip4:192.0.2.1 ip4:192.0.2.2 -all");
}

#[test]
fn test_join_txt_strings_undoes_escapes() {
    let rendered = render_txt_rdata(&[b"v=spf1 exists:\"q\".example.com".as_slice()]);
    assert_eq!(join_txt_strings(&rendered), "v=spf1 exists:\"q\".example.com");
}

#[test]
fn test_join_txt_strings_returns_unquoted_input_unchanged() {
    assert_eq!(join_txt_strings("v=spf1 -all"), "v=spf1 -all");
    assert_eq!(join_txt_strings("\"v=spf1 -all"), "\"v=spf1 -all");
    assert_eq!(join_txt_strings("\""), "\"");
    assert_eq!(join_txt_strings(""), "");
}

#[test]
fn test_join_txt_strings_returns_malformed_quoting_unchanged() {
    // Text between segments
    let stray = "\"v=spf1 ip4:192.0.2.1\" ip4:192.0.2.2 \"-all\"";
    assert_eq!(join_txt_strings(stray), stray);

    // Unterminated segment
    let unterminated = "\"v=spf1 ip4:192.0.2.1\" \"-all\" \"";
    assert_eq!(join_txt_strings(unterminated), unterminated);

    // Closing quote escaped by a backslash
    let escaped_close = "\"v=spf1 -all\\\"";
    assert_eq!(join_txt_strings(escaped_close), escaped_close);
}

#[test]
fn test_is_spf_record() {
    assert!(is_spf_record("v=spf1 -all"));
    assert!(is_spf_record("V=SPF1 include:example.com"));
    assert!(is_spf_record("v=spf1"));
    assert!(!is_spf_record("v=spf10 -all"));
    assert!(!is_spf_record("v=DMARC1; p=reject"));
    assert!(!is_spf_record("spf1"));
    assert!(!is_spf_record(""));
}

#[test]
fn test_lookup_outcome_into_records() {
    let records = vec![DnsRecord::A(Ipv4Addr::new(192, 0, 2, 1))];
    assert_eq!(
        LookupOutcome::Records(records.clone()).into_records(),
        records
    );
    assert!(LookupOutcome::NotFound.into_records().is_empty());
    assert!(LookupOutcome::Failed("SERVFAIL".to_string())
        .into_records()
        .is_empty());
}

#[test]
fn test_query_type_display() {
    assert_eq!(QueryType::Txt.to_string(), "TXT");
    assert_eq!(QueryType::A.to_string(), "A");
    assert_eq!(QueryType::Aaaa.to_string(), "AAAA");
    assert_eq!(QueryType::Mx.to_string(), "MX");
}

#[tokio::test]
async fn test_mock_resolver_answers_not_found_for_unknown_names() {
    let mut resolver = MockResolver::new();
    resolver.add_a("mail.example.com", &[Ipv4Addr::new(192, 0, 2, 25)]);

    assert_eq!(
        resolver.query("mail.example.com", QueryType::A).await,
        LookupOutcome::Records(vec![DnsRecord::A(Ipv4Addr::new(192, 0, 2, 25))])
    );
    assert_eq!(
        resolver.query("mail.example.com", QueryType::Aaaa).await,
        LookupOutcome::NotFound
    );
    assert_eq!(resolver.queries().len(), 2);
}
