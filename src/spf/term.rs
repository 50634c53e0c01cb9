//! SPF term classification.
//!
//! Splits one whitespace-delimited SPF term into its qualifier, mechanism kind
//! and value.

use std::fmt;
use std::str::FromStr;

use crate::error_handling::SquashError;

/// Result prefix of an SPF mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qualifier {
    /// `+`, the default when no prefix is written
    #[default]
    Pass,
    /// `?`
    Neutral,
    /// `~`
    SoftFail,
    /// `-`
    Fail,
}

impl Qualifier {
    /// Parses a qualifier character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Qualifier::Pass),
            '?' => Some(Qualifier::Neutral),
            '~' => Some(Qualifier::SoftFail),
            '-' => Some(Qualifier::Fail),
            _ => None,
        }
    }

    /// The qualifier character, `+` included.
    pub fn as_char(self) -> char {
        match self {
            Qualifier::Pass => '+',
            Qualifier::Neutral => '?',
            Qualifier::SoftFail => '~',
            Qualifier::Fail => '-',
        }
    }

    /// Prefix used when rendering a term. Pass is implicit and renders empty.
    pub fn term_prefix(self) -> &'static str {
        match self {
            Qualifier::Pass => "",
            Qualifier::Neutral => "?",
            Qualifier::SoftFail => "~",
            Qualifier::Fail => "-",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Qualifier {
    type Err = SquashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Qualifier::from_char(c).ok_or_else(|| SquashError::InvalidQualifier(s.to_string()))
            }
            _ => Err(SquashError::InvalidQualifier(s.to_string())),
        }
    }
}

/// What the flattener has to do with a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanismKind {
    /// `a`, `a:<domain>`, with optional CIDR lengths
    A,
    /// `mx`, `mx:<domain>`, with optional CIDR lengths
    Mx,
    /// `include:<domain>`
    Include,
    /// `redirect=<domain>`
    Redirect,
    /// `ptr` / `ptr:<domain>`, passed through unresolved
    PtrDeprecated,
    /// Anything copied through as-is (`ip4:`, `ip6:`, `exists:`, unknown)
    Literal,
    /// `all`, dropped during flattening
    All,
}

/// One classified SPF term.
///
/// `value` holds the include/redirect target for those kinds, everything after
/// the mechanism name for `a`/`mx` (for example `:mail.example.com/24`), and
/// the whole unqualified term otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    /// Explicit or inherited qualifier
    pub qualifier: Qualifier,
    /// Mechanism kind
    pub kind: MechanismKind,
    /// Mechanism argument, see above
    pub value: String,
}

impl Term {
    /// The include/redirect target, if this term has one.
    pub fn target(&self) -> Option<&str> {
        match self.kind {
            MechanismKind::Include | MechanismKind::Redirect => Some(&self.value),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.qualifier.term_prefix();
        match self.kind {
            MechanismKind::Include => write!(f, "{prefix}include:{}", self.value),
            MechanismKind::Redirect => write!(f, "{prefix}redirect={}", self.value),
            MechanismKind::A => write!(f, "{prefix}a{}", self.value),
            MechanismKind::Mx => write!(f, "{prefix}mx{}", self.value),
            MechanismKind::PtrDeprecated | MechanismKind::Literal | MechanismKind::All => {
                write!(f, "{prefix}{}", self.value)
            }
        }
    }
}

/// Classifies one SPF term.
///
/// `ambient` is the qualifier inherited from the enclosing `include`; an
/// explicit `+ ? ~ -` prefix on the term overrides it for this term only.
/// The term is lowercased before matching.
///
/// Only a term whose body is exactly `all` is the `all` mechanism. Matching
/// every term that merely ends in `all` would drop names such as
/// `exists:mail.install`.
pub fn classify(raw: &str, ambient: Qualifier) -> Term {
    let lowered = raw.trim().to_ascii_lowercase();
    let (qualifier, body) = match lowered.chars().next().and_then(Qualifier::from_char) {
        Some(explicit) => (explicit, &lowered[1..]),
        None => (ambient, lowered.as_str()),
    };

    let (kind, value) = if let Some(target) = body.strip_prefix("include:") {
        (MechanismKind::Include, target)
    } else if let Some(target) = body.strip_prefix("redirect=") {
        (MechanismKind::Redirect, target)
    } else if body == "all" {
        (MechanismKind::All, body)
    } else if let Some(rest) = mechanism_args(body, "a") {
        (MechanismKind::A, rest)
    } else if let Some(rest) = mechanism_args(body, "mx") {
        (MechanismKind::Mx, rest)
    } else if body.starts_with("ptr") {
        (MechanismKind::PtrDeprecated, body)
    } else {
        (MechanismKind::Literal, body)
    };

    Term {
        qualifier,
        kind,
        value: value.to_string(),
    }
}

/// Returns what follows `name` when `body` is that mechanism, bare or with a
/// `:domain` / `/cidr` argument.
fn mechanism_args<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let rest = body.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(':') || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Parsed `a`/`mx` arguments: `[:domain][/ip4-cidr][//ip6-cidr]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostSpec {
    /// Explicit domain; `None` means the top-level domain
    pub domain: Option<String>,
    /// IPv4 prefix length after `/`
    pub ip4_prefix: Option<u8>,
    /// IPv6 prefix length after `//`
    pub ip6_prefix: Option<u8>,
}

impl HostSpec {
    /// Parses the argument part of an `a`/`mx` term.
    ///
    /// Returns `None` for an empty domain, a macro, or an out-of-range prefix.
    pub fn parse(args: &str) -> Option<Self> {
        let (domain_part, cidr_part) = match args.strip_prefix(':') {
            Some(rest) => match rest.find('/') {
                Some(idx) => (Some(&rest[..idx]), &rest[idx..]),
                None => (Some(rest), ""),
            },
            None => (None, args),
        };

        let domain = match domain_part {
            Some(d) if d.is_empty() || d.contains('%') => return None,
            Some(d) => Some(d.trim_end_matches('.').to_string()),
            None => None,
        };

        let (ip4_part, ip6_part) = match cidr_part.find("//") {
            Some(idx) => (&cidr_part[..idx], Some(&cidr_part[idx + 2..])),
            None => (cidr_part, None),
        };

        let ip4_prefix = match ip4_part {
            "" => None,
            p => Some(parse_prefix(p.strip_prefix('/')?, 32)?),
        };
        let ip6_prefix = match ip6_part {
            None => None,
            Some(p) => Some(parse_prefix(p, 128)?),
        };

        Some(HostSpec {
            domain,
            ip4_prefix,
            ip6_prefix,
        })
    }
}

fn parse_prefix(digits: &str, max: u8) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u8>().ok().filter(|p| *p <= max)
}
