//! Structural rules evaluated over the dependency graph.
//!
//! Both rules are pure functions of a frozen [`DependencyGraph`]: they hold no
//! state between calls and return a fresh list of violations every time, so
//! they can run side by side against the same graph.
//!
//! [`DependencyGraph`]: crate::graph::DependencyGraph

pub mod circular;
pub mod layers;

use crate::core::{CycleViolation, LayerViolation};
use crate::graph::DependencyGraph;

/// Output of the two graph passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphFindings {
    pub circular: Vec<CycleViolation>,
    pub layer: Vec<LayerViolation>,
}

/// Run cycle detection and layer validation in parallel over the same graph.
///
/// The graph is only borrowed immutably, so the two passes can share it
/// without locking; `rayon::join` is the barrier the scorer waits on.
pub fn run_graph_rules(graph: &DependencyGraph) -> GraphFindings {
    let (circular, layer) = rayon::join(
        || circular::check_circular_dependencies(graph),
        || layers::check_layers(graph),
    );
    GraphFindings { circular, layer }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_passes_match_sequential() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("app/repo/a.rs", "app/service/b.rs");
        graph.add_edge("app/service/b.rs", "app/repo/a.rs");

        let findings = run_graph_rules(&graph);
        assert_eq!(
            findings.circular,
            circular::check_circular_dependencies(&graph)
        );
        assert_eq!(findings.layer, layers::check_layers(&graph));
        assert_eq!(findings.circular.len(), 1);
        assert_eq!(findings.layer.len(), 1);
    }

    #[test]
    fn test_long_chain_on_worker_thread() {
        let mut graph = DependencyGraph::new();
        for i in 0..150_000 {
            graph.add_edge(format!("src/n{:07}.rs", i), format!("src/n{:07}.rs", i + 1));
        }

        let findings = run_graph_rules(&graph);
        assert!(findings.circular.is_empty());
        assert!(findings.layer.is_empty());
    }
}
