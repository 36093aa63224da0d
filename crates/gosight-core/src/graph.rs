use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::types::FileSummary;

/// Directed graph of intra-project package imports.
///
/// Nodes are analyzed packages. An edge `a -> b` exists when some file of
/// package `a` imports a path equal to the name of analyzed package `b`,
/// with `a != b`. Parallel edges are never added.
pub struct PackageGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl PackageGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build the graph from the analyzed files.
    pub fn from_summaries(files: &[FileSummary]) -> Self {
        let mut graph = Self::new();
        for file in files {
            graph.add_package(&file.source.package);
        }
        for file in files {
            for import in &file.imports {
                if graph.contains(import) {
                    graph.add_import(&file.source.package, import);
                }
            }
        }
        graph
    }

    /// Add a package as a node. Returns the node index.
    pub fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record that `from` imports `to`. Self-imports and repeats are ignored.
    pub fn add_import(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        let from_idx = self.add_package(from);
        let to_idx = self.add_package(to);
        if self.graph.find_edge(from_idx, to_idx).is_none() {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Number of distinct analyzed packages `name` imports.
    pub fn coupling(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Outgoing)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn package_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for PackageGraph {
    fn default() -> Self {
        Self::new()
    }
}
