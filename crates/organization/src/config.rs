use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Directory names excluded from structural analysis
pub const STRUCTURAL_SKIP_DIRS: &[&str] = &[
    "test",
    "tests",
    "__tests__",
    "spec",
    "mock",
    "mocks",
    "__mocks__",
    "fixture",
    "fixtures",
    "__fixtures__",
    "generated",
    "__generated__",
    ".storybook",
    "stories",
    "storybook",
];

/// Case-insensitive comment marker of machine-written files
pub const GENERATED_MARKER: &str = "auto-generated";

/// Bytes of a file inspected for a generated marker
pub const GENERATED_SNIFF_BYTES: usize = 1024;

pub const CATCH_ALL_NAMES: &[&str] = &[
    "utils", "util", "helpers", "helper", "shared", "common", "lib", "misc",
];

/// Limits for the code organization checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationThresholds {
    /// Immediate source files above which a directory is a warning
    pub god_directory_warning: usize,

    /// Immediate source files above which a directory is critical
    pub god_directory_critical: usize,

    /// Directories with fewer source files skip the naming check
    pub naming_min_files: usize,

    /// Levels allowed below the source root
    pub max_nesting_depth: usize,

    /// Re-export statements allowed in one barrel file
    pub barrel_max_reexports: usize,

    /// Immediate files allowed in a catch-all directory
    pub catch_all_max_files: usize,

    pub catch_all_names: BTreeSet<String>,

    /// Named exports that, alongside one default export, make a file mixed
    pub mixed_export_min_named: usize,
}

impl Default for OrganizationThresholds {
    fn default() -> Self {
        Self {
            god_directory_warning: 15,
            god_directory_critical: 30,
            naming_min_files: 3,
            max_nesting_depth: 5,
            barrel_max_reexports: 10,
            catch_all_max_files: 10,
            catch_all_names: CATCH_ALL_NAMES.iter().map(|n| (*n).to_string()).collect(),
            mixed_export_min_named: 3,
        }
    }
}

/// Decides which files the structural checks ignore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipRule {
    /// A path with any of these components is skipped
    pub directories: BTreeSet<String>,
}

impl Default for SkipRule {
    fn default() -> Self {
        Self {
            directories: STRUCTURAL_SKIP_DIRS.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

impl SkipRule {
    /// Whether a relative path sits under a skipped directory
    pub fn skips_path(&self, relative: &str) -> bool {
        let mut components: Vec<&str> = relative.split('/').collect();
        components.pop();
        components.iter().any(|c| self.directories.contains(*c))
    }

    /// Whether the head of `content` carries a generated-file marker
    pub fn is_generated(content: &str) -> bool {
        let head = &content.as_bytes()[..content.len().min(GENERATED_SNIFF_BYTES)];
        let head = String::from_utf8_lossy(head).to_ascii_lowercase();
        head.contains(GENERATED_MARKER)
    }

    pub fn skips(&self, relative: &str, content: &str) -> bool {
        self.skips_path(relative) || Self::is_generated(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_structural_directories_only() {
        let rule = SkipRule::default();
        assert!(rule.skips_path("src/__tests__/a.ts"));
        assert!(rule.skips_path("tests/unit/a.py"));
        assert!(rule.skips_path("packages/ui/.storybook/main.js"));
        assert!(!rule.skips_path("src/testing/a.ts"));
        assert!(!rule.skips_path("src/test.ts"));
        assert!(!rule.skips_path("src/components/spec-sheet.tsx"));
    }

    #[test]
    fn generated_marker_must_be_near_the_top() {
        assert!(SkipRule::is_generated("/* This file is AUTO-GENERATED. */"));
        assert!(SkipRule::is_generated("# auto-generated by protoc\n"));

        let late = format!("{}\n// auto-generated", "x".repeat(GENERATED_SNIFF_BYTES));
        assert!(!SkipRule::is_generated(&late));
        assert!(!SkipRule::is_generated("export const generated = true;"));
        assert!(!SkipRule::is_generated("// @generated by relay\nexport {}"));
    }

    #[test]
    fn generated_check_tolerates_multibyte_boundary() {
        let content = "é".repeat(GENERATED_SNIFF_BYTES);
        assert!(!SkipRule::is_generated(&content));
    }
}
