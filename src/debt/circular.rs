use crate::core::{CircularDependency, CycleViolation, Severity};
use crate::graph::DependencyGraph;
use std::collections::HashMap;

/// Rule name used in reports
pub const RULE_NAME: &str = "circular-dependency";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the current DFS path
    OnPath,
    /// Fully explored; never entered again from another root
    Closed,
}

/// Detect circular dependencies using DFS.
///
/// Roots and successors are visited in lexicographic order. Whenever a
/// successor is still on the current path, the slice of the path from that
/// successor through the current node is reported as a cycle.
///
/// The result contains at least one cycle per back-edge met during this
/// single DFS forest. It is not an enumeration of every simple cycle: a cycle
/// made only of nodes already closed by an earlier root is not reported
/// again.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<CircularDependency> {
    let mut state: HashMap<&str, VisitState> = HashMap::with_capacity(graph.node_count());
    let mut path: Vec<&str> = Vec::new();
    let mut cycles = Vec::new();

    for node in graph.all_nodes() {
        if !state.contains_key(node) {
            dfs_detect_cycles(graph, node, &mut state, &mut path, &mut cycles);
        }
    }

    cycles
}

/// One node on the DFS path and the next successor to look at
struct Frame<'g> {
    node: &'g str,
    successors: Vec<&'g str>,
    next: usize,
}

impl<'g> Frame<'g> {
    fn enter(
        graph: &'g DependencyGraph,
        node: &'g str,
        state: &mut HashMap<&'g str, VisitState>,
        path: &mut Vec<&'g str>,
    ) -> Self {
        state.insert(node, VisitState::OnPath);
        path.push(node);
        Self {
            node,
            successors: graph.get_dependencies(node),
            next: 0,
        }
    }
}

// Explicit frame stack: a long import chain must not exhaust a rayon worker stack.
fn dfs_detect_cycles<'g>(
    graph: &'g DependencyGraph,
    root: &'g str,
    state: &mut HashMap<&'g str, VisitState>,
    path: &mut Vec<&'g str>,
    cycles: &mut Vec<CircularDependency>,
) {
    let mut stack = vec![Frame::enter(graph, root, state, path)];

    while let Some(frame) = stack.last_mut() {
        let Some(&dep) = frame.successors.get(frame.next) else {
            let node = frame.node;
            stack.pop();
            path.pop();
            state.insert(node, VisitState::Closed);
            continue;
        };
        frame.next += 1;

        match state.get(dep).copied() {
            None => stack.push(Frame::enter(graph, dep, state, path)),
            Some(VisitState::OnPath) => {
                if let Some(cycle_start) = path.iter().position(|m| *m == dep) {
                    let cycle = path[cycle_start..].iter().map(|m| m.to_string()).collect();
                    cycles.push(CircularDependency { cycle });
                }
            }
            Some(VisitState::Closed) => {}
        }
    }
}

/// Run the circular dependency rule: one critical violation per detected cycle
pub fn check_circular_dependencies(graph: &DependencyGraph) -> Vec<CycleViolation> {
    detect_cycles(graph)
        .into_iter()
        .map(|dep| CycleViolation {
            path: dep.cycle,
            severity: Severity::Critical,
        })
        .collect()
}

/// Render a cycle as `a → b → c → a`, closing back on the first node
pub fn format_cycle(path: &[String]) -> String {
    match path.first() {
        Some(first) => {
            let mut rendered = path.join(" → ");
            rendered.push_str(" → ");
            rendered.push_str(first);
            rendered
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_dependency_detection() {
        let mut graph = DependencyGraph::new();

        // Create a circular dependency: A -> B -> C -> A
        graph.add_edge("A", "B");
        graph.add_edge("B", "C");
        graph.add_edge("C", "A");

        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].cycle, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_self_dependency() {
        let mut graph = DependencyGraph::new();

        // Create a self-dependency: A -> A
        graph.add_edge("A", "A");

        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].cycle, vec!["A"]);
    }

    #[test]
    fn test_empty_graph_has_no_cycles() {
        assert!(detect_cycles(&DependencyGraph::new()).is_empty());
    }

    #[test]
    fn test_cycle_starts_at_back_edge_target() {
        let mut graph = DependencyGraph::new();
        // entry -> b -> c -> b: the cycle must not include "entry"
        graph.add_edge("entry", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "b");

        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].cycle, vec!["b", "c"]);
    }

    #[test]
    fn test_closed_nodes_are_not_reexplored() {
        let mut graph = DependencyGraph::new();
        // a -> c, b -> c, c -> d -> c: the c/d cycle is found once from root "a"
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("c", "d");
        graph.add_edge("d", "c");

        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].cycle, vec!["c", "d"]);
    }

    #[test]
    fn test_violations_are_critical() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("x", "y");
        graph.add_edge("y", "x");

        let violations = check_circular_dependencies(&graph);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Critical);
        assert_eq!(violations[0].path, vec!["x", "y"]);
    }

    #[test]
    fn test_long_chain_does_not_exhaust_stack() {
        let mut graph = DependencyGraph::new();
        for i in 0..200_000 {
            graph.add_edge(format!("n{:07}", i), format!("n{:07}", i + 1));
        }
        assert!(detect_cycles(&graph).is_empty());

        // closing the chain yields a single cycle through every node
        graph.add_edge("n0200000", "n0000000");
        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 1);
        assert_eq!(circular[0].cycle.len(), 200_001);
        assert_eq!(circular[0].cycle[0], "n0000000");
    }

    #[test]
    fn test_sibling_successors_visited_in_order() {
        let mut graph = DependencyGraph::new();
        // a -> b -> a and a -> c -> a: both back-edges are reported, b first
        graph.add_edge("a", "c");
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        graph.add_edge("c", "a");

        let circular = detect_cycles(&graph);
        assert_eq!(circular.len(), 2);
        assert_eq!(circular[0].cycle, vec!["a", "b"]);
        assert_eq!(circular[1].cycle, vec!["a", "c"]);
    }

    #[test]
    fn test_format_cycle_closes_loop() {
        let path = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_cycle(&path), "a → b → a");
        assert_eq!(format_cycle(&["solo".to_string()]), "solo → solo");
        assert_eq!(format_cycle(&[]), "");
    }
}
