//! # Audit Organization
//!
//! Structural checks over a source tree: directory shape, naming, barrels,
//! export style and import cycles.
//!
//! ## Pipeline
//!
//! ```text
//! SourceFile[] + Workspace[]
//!     │
//!     ├──> Tree statistics (every file)
//!     │
//!     ├──> Skip rule (test/mock/fixture/generated/storybook paths, auto-generated files)
//!     │
//!     ├──> Directory checks
//!     │      ├─ god-directory
//!     │      ├─ mixed-naming-convention
//!     │      └─ catch-all-directory
//!     │
//!     ├──> File checks
//!     │      ├─ barrel-bloat
//!     │      └─ mixed-export-style
//!     │
//!     ├──> deep-nesting (relative to the source root)
//!     │
//!     └──> circular-dependency (audit-graph, one graph per workspace)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use audit_organization::{FindingType, OrganizationAnalyzer};
//! use audit_workspace::SourceFile;
//!
//! let files = vec![
//!     SourceFile::new("src/a.ts", "import './b';"),
//!     SourceFile::new("src/b.ts", "import './a';"),
//! ];
//! let report = OrganizationAnalyzer::default().analyze(&files, &[]);
//! assert_eq!(report.stats.circular_dependency_count, 1);
//! assert_eq!(report.findings[0].finding_type, FindingType::CircularDependency);
//! ```

mod analyzer;
mod config;
mod exports;
mod naming;
mod types;

pub use analyzer::OrganizationAnalyzer;
pub use config::{
    OrganizationThresholds, SkipRule, CATCH_ALL_NAMES, GENERATED_MARKER, STRUCTURAL_SKIP_DIRS,
};
pub use exports::{count_reexports, is_barrel_file, ExportShape};
pub use naming::NamingConvention;
pub use types::{
    sort_findings, CodeOrganizationStats, FindingType, OrganizationReport, Severity,
    StructuralFinding,
};
