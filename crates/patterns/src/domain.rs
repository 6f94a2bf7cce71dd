use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit category a detector belongs to.
///
/// Variants are declared from most specific to most general; that order is
/// the precedence used when a detector could belong to several domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Forms,
    Validation,
    DateTime,
    #[serde(rename = "i18n")]
    Internationalization,
    Crypto,
    Parsing,
    DataFetching,
    HttpClient,
    StateManagement,
    Styling,
    Accessibility,
    Logging,
    Animation,
    Testing,
    Architecture,
    Utility,
}

impl Domain {
    /// Every domain in precedence order.
    pub const ALL: [Domain; 16] = [
        Domain::Forms,
        Domain::Validation,
        Domain::DateTime,
        Domain::Internationalization,
        Domain::Crypto,
        Domain::Parsing,
        Domain::DataFetching,
        Domain::HttpClient,
        Domain::StateManagement,
        Domain::Styling,
        Domain::Accessibility,
        Domain::Logging,
        Domain::Animation,
        Domain::Testing,
        Domain::Architecture,
        Domain::Utility,
    ];

    /// Lower rank = more specific.
    pub fn specificity_rank(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Pick the most specific domain out of a candidate set.
    pub fn most_specific(candidates: &[Domain]) -> Option<Domain> {
        candidates
            .iter()
            .copied()
            .min_by_key(|domain| domain.specificity_rank())
    }

    /// Domains with no static detectors; the recommendation agent covers them.
    pub fn is_deferred(self) -> bool {
        matches!(self, Domain::Animation | Domain::Testing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Forms => "forms",
            Domain::Validation => "validation",
            Domain::DateTime => "date-time",
            Domain::Internationalization => "i18n",
            Domain::Crypto => "crypto",
            Domain::Parsing => "parsing",
            Domain::DataFetching => "data-fetching",
            Domain::HttpClient => "http-client",
            Domain::StateManagement => "state-management",
            Domain::Styling => "styling",
            Domain::Accessibility => "accessibility",
            Domain::Logging => "logging",
            Domain::Animation => "animation",
            Domain::Testing => "testing",
            Domain::Architecture => "architecture",
            Domain::Utility => "utility",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_prefers_earlier_variant() {
        assert_eq!(
            Domain::most_specific(&[Domain::Utility, Domain::DateTime]),
            Some(Domain::DateTime)
        );
        assert_eq!(
            Domain::most_specific(&[Domain::HttpClient, Domain::DataFetching]),
            Some(Domain::DataFetching)
        );
        assert_eq!(Domain::most_specific(&[]), None);
    }

    #[test]
    fn ranks_follow_declaration_order() {
        for (idx, domain) in Domain::ALL.iter().enumerate() {
            assert_eq!(domain.specificity_rank(), idx);
        }
    }

    #[test]
    fn display_uses_kebab_case_names() {
        assert_eq!(Domain::StateManagement.to_string(), "state-management");
        assert_eq!(Domain::Internationalization.to_string(), "i18n");
    }

    #[test]
    fn only_animation_and_testing_are_deferred() {
        let deferred: Vec<_> = Domain::ALL.iter().filter(|d| d.is_deferred()).collect();
        assert_eq!(deferred, vec![&Domain::Animation, &Domain::Testing]);
    }
}
