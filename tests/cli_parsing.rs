//! Tests for command-line parsing of `Config`.

use clap::Parser;
use spf_squash::config::DNS_TIMEOUT_SECS;
use spf_squash::spf::Qualifier;
use spf_squash::{Config, OutputFormat, SpfSource};

fn parse(args: &[&str]) -> Result<Config, clap::Error> {
    Config::try_parse_from(std::iter::once("spf_squash").chain(args.iter().copied()))
}

#[test]
fn test_origin_source_with_defaults() {
    let config = parse(&["--domain", "example.com", "--origin-spf", "example.com"]).unwrap();

    assert_eq!(config.domain, "example.com");
    assert_eq!(config.origin_spf.as_deref(), Some("example.com"));
    assert_eq!(config.realspf, None);
    assert_eq!(config.qualifier, Qualifier::SoftFail);
    assert_eq!(config.format, OutputFormat::Plain);
    assert_eq!(config.dns_timeout_secs, DNS_TIMEOUT_SECS);
    assert!(!config.system_resolver);
}

#[test]
fn test_literal_source() {
    let config = parse(&[
        "--domain",
        "example.com",
        "--realspf",
        "v=spf1 include:_spf.example.net mx -all",
    ])
    .unwrap();

    let request = config.to_request().unwrap();
    assert_eq!(
        request.source,
        SpfSource::Literal("v=spf1 include:_spf.example.net mx -all".to_string())
    );
}

#[test]
fn test_source_is_required() {
    let err = parse(&["--domain", "example.com"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_sources_are_mutually_exclusive() {
    let err = parse(&[
        "--domain",
        "example.com",
        "--origin-spf",
        "example.com",
        "--realspf",
        "v=spf1 -all",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_domain_is_required() {
    assert!(parse(&["--origin-spf", "example.com"]).is_err());
}

#[test]
fn test_qualifier_values() {
    for (arg, expected) in [
        ("--qualifier=-", Qualifier::Fail),
        ("--qualifier=+", Qualifier::Pass),
        ("--qualifier=?", Qualifier::Neutral),
        ("--qualifier=~", Qualifier::SoftFail),
    ] {
        let config = parse(&["--domain", "example.com", "--origin-spf", "example.com", arg])
            .unwrap();
        assert_eq!(config.qualifier, expected, "for {arg}");
    }
}

#[test]
fn test_hyphen_qualifier_as_separate_value() {
    let config = parse(&[
        "--domain",
        "example.com",
        "--origin-spf",
        "example.com",
        "--qualifier",
        "-",
    ])
    .unwrap();
    assert_eq!(config.qualifier, Qualifier::Fail);
}

#[test]
fn test_invalid_qualifier_rejected() {
    let err = parse(&[
        "--domain",
        "example.com",
        "--origin-spf",
        "example.com",
        "--qualifier=x",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_output_and_resolver_options() {
    let config = parse(&[
        "--domain",
        "example.com",
        "--origin-spf",
        "example.com",
        "--format",
        "quoted",
        "--dns-timeout-secs",
        "9",
        "--system-resolver",
    ])
    .unwrap();

    assert_eq!(config.format, OutputFormat::Quoted);
    assert_eq!(config.dns_timeout_secs, 9);
    assert!(config.system_resolver);
}
