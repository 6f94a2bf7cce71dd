use crate::naming::NamingConvention;
use audit_patterns::Domain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of structural finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingType {
    GodDirectory,
    MixedNamingConvention,
    DeepNesting,
    BarrelBloat,
    CatchAllDirectory,
    CircularDependency,
    /// Emitted by design-system analysis downstream, never by this crate
    HardcodedConfigValues,
    /// Emitted by design-system analysis downstream, never by this crate
    MissingLayer,
}

impl FindingType {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingType::GodDirectory => "god-directory",
            FindingType::MixedNamingConvention => "mixed-naming-convention",
            FindingType::DeepNesting => "deep-nesting",
            FindingType::BarrelBloat => "barrel-bloat",
            FindingType::CatchAllDirectory => "catch-all-directory",
            FindingType::CircularDependency => "circular-dependency",
            FindingType::HardcodedConfigValues => "hardcoded-config-values",
            FindingType::MissingLayer => "missing-layer",
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
    Critical,
}

/// A structural observation about directory layout or the import graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralFinding {
    #[serde(rename = "type")]
    pub finding_type: FindingType,

    pub domain: Domain,

    pub severity: Severity,

    /// Involved paths; cycle order for circular dependencies
    pub paths: Vec<String>,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl StructuralFinding {
    pub fn new(
        finding_type: FindingType,
        severity: Severity,
        paths: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            finding_type,
            domain: Domain::Architecture,
            severity,
            paths,
            description: description.into(),
            metadata: None,
        }
    }

    /// Attach one metadata entry
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// Sort findings by (type, paths, description).
pub fn sort_findings(findings: &mut [StructuralFinding]) {
    findings.sort_by(|a, b| {
        a.finding_type
            .cmp(&b.finding_type)
            .then_with(|| a.paths.cmp(&b.paths))
            .then_with(|| a.description.cmp(&b.description))
    });
}

/// Whole-tree statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeOrganizationStats {
    pub total_source_files: usize,

    /// Deepest directory level holding a source file (0 = scan root)
    pub max_directory_depth: usize,

    pub circular_dependency_count: usize,

    pub naming_conventions: BTreeMap<NamingConvention, usize>,
}

/// Analyzer output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationReport {
    pub findings: Vec<StructuralFinding>,
    pub stats: CodeOrganizationStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finding_serializes_with_type_tag() {
        let finding = StructuralFinding::new(
            FindingType::BarrelBloat,
            Severity::Warning,
            vec!["src/components/Card.tsx".to_string()],
            "mixed exports",
        )
        .with_meta("issue", "mixed-export-style");

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "barrel-bloat");
        assert_eq!(json["domain"], "architecture");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["metadata"]["issue"], "mixed-export-style");
    }

    #[test]
    fn metadata_is_omitted_when_absent() {
        let finding = StructuralFinding::new(
            FindingType::GodDirectory,
            Severity::Critical,
            vec!["src".to_string()],
            "too many files",
        );
        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn findings_sort_by_type_then_paths() {
        let make = |t, p: &str| StructuralFinding::new(t, Severity::Warning, vec![p.to_string()], "");
        let mut findings = vec![
            make(FindingType::DeepNesting, "b"),
            make(FindingType::GodDirectory, "z"),
            make(FindingType::DeepNesting, "a"),
        ];
        sort_findings(&mut findings);
        let order: Vec<(FindingType, &str)> = findings
            .iter()
            .map(|f| (f.finding_type, f.paths[0].as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (FindingType::GodDirectory, "z"),
                (FindingType::DeepNesting, "a"),
                (FindingType::DeepNesting, "b"),
            ]
        );
    }
}
