use crate::error::{Result, ScanError};
use audit_organization::{OrganizationThresholds, SkipRule};
use audit_workspace::WalkOptions;
use serde::{Deserialize, Serialize};

/// Scan configuration. Every field is optional in TOML.
///
/// ```toml
/// [walk]
/// ignored_dirs = ["node_modules", "dist"]
/// source_extensions = ["ts", "tsx"]
/// max_file_size = 524288
///
/// [skip]
/// directories = ["tests", "__mocks__"]
///
/// [thresholds]
/// god_directory_warning = 20
/// god_directory_critical = 40
/// max_nesting_depth = 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub walk: WalkOptions,
    pub skip: SkipRule,
    pub thresholds: OrganizationThresholds,
}

impl ScanConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScanConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.walk.source_extensions.is_empty() {
            return Err(ScanError::InvalidConfig(
                "walk.source_extensions must not be empty".to_string(),
            ));
        }

        let t = &self.thresholds;
        if t.god_directory_critical < t.god_directory_warning {
            return Err(ScanError::InvalidConfig(format!(
                "thresholds.god_directory_critical ({}) is below god_directory_warning ({})",
                t.god_directory_critical, t.god_directory_warning
            )));
        }

        if t.max_nesting_depth == 0 {
            return Err(ScanError::InvalidConfig(
                "thresholds.max_nesting_depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
