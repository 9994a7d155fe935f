use crate::core::ModuleImports;
use std::collections::{BTreeMap, BTreeSet};

/// Directed dependency graph over opaque node identifiers.
///
/// An edge `from -> to` means "`from` depends on `to`". Nodes and edges are
/// kept in ordered containers so every traversal visits them in
/// lexicographic order, which keeps cycle reports and layer violations
/// reproducible across runs and platforms.
///
/// Every edge endpoint is always present in the node set: [`add_edge`]
/// creates missing endpoints instead of rejecting them.
///
/// [`add_edge`]: DependencyGraph::add_edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Build a graph from extracted imports.
    ///
    /// Every listed node becomes part of the graph even when it has no
    /// dependencies, so isolated files still count toward the node total.
    pub fn from_imports(imports: &[ModuleImports]) -> Self {
        imports
            .iter()
            .fold(DependencyGraph::new(), |mut graph, module| {
                graph.add_node(module.node_id.as_str());
                module
                    .depends_on
                    .iter()
                    .for_each(|dep| graph.add_edge(module.node_id.as_str(), dep.as_str()));
                graph
            })
    }

    /// Add a node to the graph. Adding an existing node is a no-op.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Add a dependency edge, creating either endpoint if it is missing.
    /// Adding an existing edge is a no-op. Self-loops are allowed.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let to = to.into();
        self.add_node(to.clone());
        self.adjacency.entry(from.into()).or_default().insert(to);
    }

    /// Direct dependencies of a node, in lexicographic order.
    /// Unknown nodes have no dependencies.
    pub fn get_dependencies(&self, id: &str) -> Vec<&str> {
        self.adjacency
            .get(id)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All nodes in lexicographic order
    pub fn all_nodes(&self) -> Vec<&str> {
        self.adjacency.keys().map(String::as_str).collect()
    }

    /// Every edge as a `(from, to)` pair, ordered by `from` then `to`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get the number of unique edges in the graph
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|deps| deps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
