//! # Audit Scan
//!
//! Deterministic code-audit core: finds hand-rolled implementations of
//! well-known library functionality and structural defects in a source tree.
//!
//! ## Pipeline
//!
//! ```text
//! Root path + ScanConfig
//!     │
//!     ├──> FileWalker (one walk) → WalkedFile[]
//!     │
//!     ├──> WorkspaceResolver → Workspace[] (+ manifest warnings)
//!     │
//!     ├──> load_source (parallel) → SourceFile[] (+ skip warnings)
//!     │
//!     ├──> PatternMatcher (parallel) → Detection[]
//!     │
//!     ├──> OrganizationAnalyzer → StructuralFinding[] + CodeOrganizationStats
//!     │
//!     └──> ScanResult (every list sorted)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use audit_scan::{ScanConfig, Scanner};
//!
//! let config = ScanConfig::from_toml_str("[thresholds]\nmax_nesting_depth = 6\n")?;
//! let result = Scanner::new(config)?.scan("/path/to/project");
//!
//! for detection in &result.detections {
//!     println!(
//!         "{}:{} {}",
//!         detection.file_path, detection.line_range.start, detection.pattern_category
//!     );
//! }
//! # Ok::<(), audit_scan::ScanError>(())
//! ```

mod config;
mod error;
mod result;
mod scanner;

pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use result::{ScanResult, ScanWarning};
pub use scanner::{scan, Scanner};

pub use audit_organization::{
    CodeOrganizationStats, FindingType, NamingConvention, OrganizationThresholds, Severity,
    SkipRule, StructuralFinding,
};
pub use audit_patterns::{Detection, Domain, LineRange, PatternCatalog, PatternDefinition};
pub use audit_workspace::{Language, PackageManager, WalkOptions, Workspace};
