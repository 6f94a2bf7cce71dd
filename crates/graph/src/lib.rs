//! # Audit Graph
//!
//! File-level import graph for one workspace and cycle detection over it.
//!
//! ## Architecture
//!
//! ```text
//! SourceFile[]
//!     │
//!     ├──> Import extraction (regex, static specifiers only)
//!     │      ├─ JS/TS: import/export from, side-effect import, require(), import()
//!     │      ├─ Python: from .x import y
//!     │      └─ C/C++: #include "./x.h"
//!     │
//!     ├──> Resolution against known files
//!     │      └─ exact → +ext → .js→.ts → index.* / __init__.py
//!     │
//!     ├──> DependencyGraph (petgraph DiGraph, path → NodeIndex)
//!     │
//!     └──> Cycle detection
//!            ├─ strongly connected components (kosaraju)
//!            ├─ elementary cycles per component (iterative DFS, bounded)
//!            └─ normalized, deduplicated, sorted cycles
//! ```
//!
//! ## Example
//!
//! ```rust
//! use audit_graph::GraphBuilder;
//! use audit_workspace::SourceFile;
//!
//! let files = vec![
//!     SourceFile::new("src/a.ts", "import { b } from './b';"),
//!     SourceFile::new("src/b.ts", "import { a } from './a';"),
//! ];
//! let graph = GraphBuilder::default().build(&files);
//! assert_eq!(graph.find_cycles(), vec![vec!["src/a.ts".to_string(), "src/b.ts".to_string()]]);
//! ```

mod builder;
mod cycle;
mod imports;
mod resolve;
mod types;

pub use builder::GraphBuilder;
pub use cycle::{normalize_cycle, MAX_CYCLES_PER_COMPONENT};
pub use imports::extract_imports;
pub use resolve::{normalize, resolve_specifier};
pub use types::{DependencyGraph, ImportEdge};
