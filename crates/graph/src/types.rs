use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed import edge between two files
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Importing file
    pub from: String,

    /// Imported file
    pub to: String,
}

/// File-level import graph of one workspace
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Directed graph (file -> imported file)
    pub(crate) graph: DiGraph<String, ()>,

    /// Path -> NodeIndex mapping, sorted by path
    pub(crate) index: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file node; adding a known path returns its existing index
    pub fn add_file(&mut self, path: impl Into<String>) -> NodeIndex {
        let path = path.into();
        if let Some(&idx) = self.index.get(&path) {
            return idx;
        }
        let idx = self.graph.add_node(path.clone());
        self.index.insert(path, idx);
        idx
    }

    /// Add `from -> to`. Unknown endpoints, self edges and duplicates are ignored.
    pub fn add_import(&mut self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if a == b || self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn node_index(&self, path: &str) -> Option<NodeIndex> {
        self.index.get(path).copied()
    }

    pub fn path(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Files in lexicographic order
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Files imported by `path`, sorted
    pub fn imports_of(&self, path: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(path) else {
            return Vec::new();
        };
        let mut targets: Vec<&str> = self
            .graph
            .neighbors(idx)
            .filter_map(|n| self.path(n))
            .collect();
        targets.sort_unstable();
        targets
    }

    /// Every edge, sorted by (from, to)
    pub fn edges(&self) -> Vec<ImportEdge> {
        let mut edges: Vec<ImportEdge> = self
            .graph
            .edge_references()
            .filter_map(|e| {
                Some(ImportEdge {
                    from: self.path(e.source())?.to_string(),
                    to: self.path(e.target())?.to_string(),
                })
            })
            .collect();
        edges.sort();
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
