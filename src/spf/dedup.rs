//! Term deduplication and the squashed policy.

use std::collections::BTreeSet;

use super::term::Qualifier;

/// Lowercases, sorts and deduplicates flattened terms.
///
/// The qualifier is part of each term string, so `ip4:192.0.2.1` and
/// `-ip4:192.0.2.1` are distinct and both survive: collapsing them would change
/// what the policy evaluates to. Sorting only makes the output reproducible.
pub fn dedup_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// The final set of terms plus the synthesized trailing `all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquashedPolicy {
    terms: Vec<String>,
    all_qualifier: Qualifier,
}

impl SquashedPolicy {
    /// Deduplicates `flattened` and records the qualifier of the trailing `all`.
    pub fn new<I, S>(flattened: I, all_qualifier: Qualifier) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: dedup_terms(flattened),
            all_qualifier,
        }
    }

    /// Unique terms in sorted order, without the trailing `all`.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Qualifier of the trailing `all`.
    pub fn all_qualifier(&self) -> Qualifier {
        self.all_qualifier
    }

    /// The trailing `all`, always written with its qualifier character (`+all`).
    pub fn all_term(&self) -> String {
        format!("{}all", self.all_qualifier.as_char())
    }

    /// Every term in output order, `all` last.
    pub fn to_terms(&self) -> Vec<String> {
        let mut terms = self.terms.clone();
        terms.push(self.all_term());
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_sorts_and_removes_duplicates() {
        let terms = dedup_terms([
            "ip4:192.0.2.2",
            "ip4:192.0.2.1",
            "IP4:192.0.2.2",
            "ip4:192.0.2.1",
        ]);
        assert_eq!(terms, vec!["ip4:192.0.2.1", "ip4:192.0.2.2"]);
    }

    #[test]
    fn test_dedup_keeps_distinct_qualifiers() {
        let terms = dedup_terms(["ip4:192.0.2.0/24", "-ip4:192.0.2.0/24"]);
        assert_eq!(terms.len(), 2);
        assert!(terms.contains(&"-ip4:192.0.2.0/24".to_string()));
        assert!(terms.contains(&"ip4:192.0.2.0/24".to_string()));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup_terms(["ip6:2001:db8::1", "ip4:10.0.0.1", "ip4:10.0.0.1", "~ip4:10.0.0.2"]);
        let twice = dedup_terms(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_drops_empty_terms() {
        assert!(dedup_terms(["", "  "]).is_empty());
    }

    #[test]
    fn test_squashed_policy_appends_all_last() {
        let policy = SquashedPolicy::new(["ip4:10.0.0.2", "ip4:10.0.0.1"], Qualifier::Fail);
        assert_eq!(
            policy.to_terms(),
            vec!["ip4:10.0.0.1", "ip4:10.0.0.2", "-all"]
        );
    }

    #[test]
    fn test_pass_all_keeps_its_prefix() {
        let policy = SquashedPolicy::new(Vec::<String>::new(), Qualifier::Pass);
        assert_eq!(policy.all_term(), "+all");
        assert!(policy.terms().is_empty());
    }
}
