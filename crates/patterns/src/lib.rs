//! # Audit Patterns
//!
//! Static catalog of detectors for hand-rolled implementations of well-known
//! library functionality, and the engine that applies it to file contents.
//!
//! ## Pipeline
//!
//! ```text
//! PatternDefinition[]
//!     │
//!     ├──> PatternCatalog::new (validate ids/confidence, compile globs + regexes)
//!     │
//!     └──> PatternMatcher
//!            ├─ glob filter per file path
//!            ├─ Detector::find → first match span
//!            └─ Detection { file, lines, pattern, confidence, domain }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use audit_patterns::{PatternCatalog, PatternMatcher};
//!
//! let catalog = PatternCatalog::builtin().unwrap();
//! let matcher = PatternMatcher::new(&catalog);
//!
//! let found = matcher.scan_file("src/app.ts", "import cfg from '../../../config/app';\n");
//! assert_eq!(found[0].pattern_category, "deep-relative-import");
//! ```

mod builtin;
mod catalog;
mod detector;
mod domain;
mod error;
mod matcher;
mod types;

pub use builtin::builtin_definitions;
pub use catalog::{CatalogEntry, PatternCatalog};
pub use detector::{Detector, MatchSpan, RegexDetector};
pub use domain::Domain;
pub use error::{PatternError, Result};
pub use matcher::{line_range_for, sort_detections, PatternMatcher};
pub use types::{Detection, LineRange, PatternDefinition};
