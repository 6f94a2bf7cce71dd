//! # Audit Workspace
//!
//! Everything the audit needs to know about the tree on disk before it looks
//! at code: which files exist, which of them are text, and which directories
//! are project roots.
//!
//! ## Pipeline
//!
//! ```text
//! Scan root
//!     │
//!     ├──> FileWalker (.gitignore aware, sorted)
//!     │      └─> WalkedFile[]
//!     │
//!     ├──> WorkspaceResolver
//!     │      ├─> manifests (package.json > Cargo.toml > pyproject.toml > go.mod)
//!     │      ├─> lock files → package manager
//!     │      └─> dominant language per root
//!     │
//!     └──> load_source (size / binary / UTF-8 checks)
//!            └─> SourceFile[]
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use audit_workspace::{WalkOptions, WorkspaceResolver};
//! use std::path::Path;
//!
//! let resolution = WorkspaceResolver::new(WalkOptions::default()).resolve(Path::new("."));
//! for ws in &resolution.workspaces {
//!     println!("{} ({}, {})", ws.root, ws.language.as_str(), ws.package_manager.as_str());
//! }
//! ```

mod error;
mod language;
mod manifest;
mod resolver;
mod source;
mod walker;

pub use error::{Result, WorkspaceError};
pub use language::Language;
pub use manifest::{parse_manifest, ManifestKind, PackageManager, ParsedManifest, LOCK_FILES};
pub use resolver::{owner_index, ManifestWarning, Resolution, Workspace, WorkspaceResolver};
pub use source::{load_source, SkipReason, SourceFile};
pub use walker::{parent_dir, FileWalker, WalkOptions, WalkedFile};
