use crate::imports::extract_imports;
use crate::resolve::resolve_specifier;
use crate::types::DependencyGraph;
use audit_workspace::{SourceFile, WalkOptions};
use std::collections::BTreeSet;

/// Build a file-level import graph from loaded sources
pub struct GraphBuilder {
    /// Extensions tried, in order, when a specifier omits one
    extensions: Vec<String>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(WalkOptions::default().source_extensions)
    }
}

impl GraphBuilder {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Every file becomes a node; resolved relative imports become edges.
    pub fn build<'a>(&self, files: impl IntoIterator<Item = &'a SourceFile>) -> DependencyGraph {
        let mut files: Vec<&SourceFile> = files.into_iter().collect();
        files.sort_by(|a, b| a.relative.cmp(&b.relative));

        let mut graph = DependencyGraph::new();
        for file in &files {
            graph.add_file(file.relative.as_str());
        }
        let known: BTreeSet<String> = files.iter().map(|f| f.relative.clone()).collect();

        let mut unresolved = 0usize;
        for file in &files {
            for specifier in extract_imports(&file.relative, &file.content) {
                match resolve_specifier(&file.relative, &specifier, &known, &self.extensions) {
                    Some(target) => {
                        graph.add_import(&file.relative, &target);
                    }
                    None => unresolved += 1,
                }
            }
        }

        log::debug!("{unresolved} relative import(s) did not resolve");
        log::info!(
            "Built dependency graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportEdge;
    use pretty_assertions::assert_eq;

    fn edge(from: &str, to: &str) -> ImportEdge {
        ImportEdge {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn builds_edges_across_languages() {
        let files = vec![
            SourceFile::new("src/app.ts", "import { h } from './lib/helpers';\nimport x from 'react';\n"),
            SourceFile::new("src/lib/helpers.ts", "export * from './index.js';\n"),
            SourceFile::new("src/lib/index.ts", "export const v = require('../app');\n"),
            SourceFile::new("py/pkg/a.py", "from .b import thing\n"),
            SourceFile::new("py/pkg/b.py", "import os\n"),
            SourceFile::new("c/main.c", "#include \"./util.h\"\n"),
            SourceFile::new("c/util.h", ""),
        ];

        let graph = GraphBuilder::default().build(&files);

        assert_eq!(graph.node_count(), 7);
        assert_eq!(
            graph.edges(),
            vec![
                edge("c/main.c", "c/util.h"),
                edge("py/pkg/a.py", "py/pkg/b.py"),
                edge("src/app.ts", "src/lib/helpers.ts"),
                edge("src/lib/helpers.ts", "src/lib/index.ts"),
                edge("src/lib/index.ts", "src/app.ts"),
            ]
        );
    }

    #[test]
    fn unresolved_and_escaping_imports_are_dropped() {
        let files = vec![
            SourceFile::new("a.ts", "import '../outside';\nimport './missing';\nimport './a';\n"),
        ];
        let graph = GraphBuilder::default().build(&files);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
