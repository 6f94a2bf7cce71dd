use audit_organization::{CodeOrganizationStats, StructuralFinding};
use audit_patterns::Detection;
use audit_workspace::{ManifestWarning, Workspace};
use serde::{Deserialize, Serialize};

/// A file or manifest the scan passed over
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanWarning {
    /// Path relative to the scan root
    pub path: String,

    pub reason: String,
}

impl From<ManifestWarning> for ScanWarning {
    fn from(warning: ManifestWarning) -> Self {
        Self {
            path: warning.path,
            reason: format!("malformed manifest: {}", warning.reason),
        }
    }
}

/// Everything one scan produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Sorted by (file path, start line, pattern category)
    pub detections: Vec<Detection>,

    /// Sorted by (type, paths)
    pub structural_findings: Vec<StructuralFinding>,

    pub code_organization_stats: CodeOrganizationStats,

    /// Root workspace first, then nested roots
    pub workspaces: Vec<Workspace>,

    /// Sorted by path
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
            && self.structural_findings.is_empty()
            && self.workspaces.is_empty()
            && self.code_organization_stats.total_source_files == 0
    }
}
