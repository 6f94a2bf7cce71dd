use crate::domain::Domain;
use serde::{Deserialize, Serialize};

/// Static description of one detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinition {
    /// Unique identifier, reported as `Detection::pattern_category`
    pub id: String,

    /// Single most-specific audit domain
    pub domain: Domain,

    /// Human-readable summary of the hand-rolled construct
    pub description: String,

    /// Globs restricting which files the detector applies to
    pub file_patterns: Vec<String>,

    /// Ordered regex sources; the first one that matches wins
    pub code_patterns: Vec<String>,

    /// Base confidence in [0, 1]
    pub confidence_base: f32,
}

impl PatternDefinition {
    /// Build a definition whose domain is the most specific of `domains`.
    ///
    /// An empty candidate list falls back to [`Domain::Utility`].
    pub fn new(
        id: impl Into<String>,
        domains: &[Domain],
        description: impl Into<String>,
        file_patterns: &[&str],
        code_patterns: &[&str],
        confidence_base: f32,
    ) -> Self {
        Self {
            id: id.into(),
            domain: Domain::most_specific(domains).unwrap_or(Domain::Utility),
            description: description.into(),
            file_patterns: file_patterns.iter().map(|p| (*p).to_string()).collect(),
            code_patterns: code_patterns.iter().map(|p| (*p).to_string()).collect(),
            confidence_base,
        }
    }
}

/// Inclusive 1-based line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Create a range; `end` is clamped so that `start <= end` always holds.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        let start = start.max(1);
        Self {
            start,
            end: end.max(start),
        }
    }
}

/// One (pattern, file) match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Path relative to the scan root, forward slashes
    pub file_path: String,

    pub line_range: LineRange,

    /// Id of the matching `PatternDefinition`
    pub pattern_category: String,

    pub confidence_score: f32,

    pub domain: Domain,
}

impl Detection {
    /// Deterministic ordering key: path, start line, pattern id
    pub fn sort_key(&self) -> (&str, usize, &str) {
        (
            self.file_path.as_str(),
            self.line_range.start,
            self.pattern_category.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_range_never_inverts() {
        let range = LineRange::new(0, 0);
        assert_eq!(range, LineRange { start: 1, end: 1 });

        let range = LineRange::new(7, 3);
        assert_eq!(range, LineRange { start: 7, end: 7 });
    }

    #[test]
    fn definition_takes_most_specific_domain() {
        let def = PatternDefinition::new(
            "x",
            &[Domain::Utility, Domain::Validation, Domain::Forms],
            "d",
            &["**/*.ts"],
            &["foo"],
            0.5,
        );
        assert_eq!(def.domain, Domain::Forms);
    }
}
