//! Layer-direction validation.
//!
//! Nodes are sorted into three architectural layers by the path components
//! they contain. Dependencies are allowed to point down the stack
//! (handler → service → repo, including skips such as handler → repo) and
//! are flagged when they point back up.

use crate::core::LayerViolation;
use crate::graph::DependencyGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule name used in reports
pub const RULE_NAME: &str = "layer-validation";

/// Architectural layer, ordered from the top of the stack down
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Handler,
    Service,
    Repo,
}

impl Layer {
    /// Keywords checked in priority order; the first whole-component match wins
    const PRIORITY: [Layer; 3] = [Layer::Handler, Layer::Service, Layer::Repo];

    /// Position in the stack: Handler=0, Service=1, Repo=2
    pub fn rank(self) -> u8 {
        match self {
            Layer::Handler => 0,
            Layer::Service => 1,
            Layer::Repo => 2,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Layer::Handler => "handler",
            Layer::Service => "service",
            Layer::Repo => "repo",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Infer the layer of a node from its path.
///
/// The identifier is split on `/` and `\`; a keyword only matches a whole
/// component, so `user_repo.rs`, `repo.rs` or `services` do not count. Files
/// belong to a layer through their directory (`src/repo/mod.rs`,
/// `src/repo/user.rs`). Paths with no recognized component fall back to
/// [`Layer::Service`].
pub fn classify_layer(node_id: &str) -> Layer {
    Layer::PRIORITY
        .into_iter()
        .find(|layer| has_path_component(node_id, layer.keyword()))
        .unwrap_or(Layer::Service)
}

fn has_path_component(path: &str, keyword: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == keyword)
}

/// An import is upward when it points from a lower layer to a higher one
pub fn is_upward_import(from: Layer, to: Layer) -> bool {
    to.rank() < from.rank()
}

/// Check every edge of the graph and report each upward import.
///
/// One violation is produced per offending edge, in edge order.
pub fn check_layers(graph: &DependencyGraph) -> Vec<LayerViolation> {
    graph
        .edges()
        .filter_map(|(from, to)| {
            let from_layer = classify_layer(from);
            let to_layer = classify_layer(to);
            is_upward_import(from_layer, to_layer).then(|| LayerViolation {
                from: from.to_string(),
                to: to.to_string(),
                message: format_layer_violation(from, to, from_layer, to_layer),
            })
        })
        .collect()
}

fn format_layer_violation(from: &str, to: &str, from_layer: Layer, to_layer: Layer) -> String {
    format!(
        "{} ({}) -> {} ({}): upward import not allowed",
        from, from_layer, to, to_layer
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_whole_component() {
        assert_eq!(classify_layer("project/handler/user.rs"), Layer::Handler);
        assert_eq!(classify_layer("project/service/user.rs"), Layer::Service);
        assert_eq!(classify_layer("project/repo/user.rs"), Layer::Repo);
        assert_eq!(classify_layer("repo"), Layer::Repo);
        assert_eq!(classify_layer("src\\handler\\mod.rs"), Layer::Handler);
    }

    #[test]
    fn test_partial_component_does_not_match() {
        assert_eq!(classify_layer("project/repository/user.rs"), Layer::Service);
        assert_eq!(classify_layer("project/db/user_repo.rs"), Layer::Service);
        assert_eq!(classify_layer("project/handlers/user.rs"), Layer::Service);
        assert_eq!(classify_layer("project/repo.rs.bak/user.rs"), Layer::Service);
    }

    #[test]
    fn test_file_names_are_not_components() {
        assert_eq!(classify_layer("src/repo.rs"), Layer::Service);
        assert_eq!(classify_layer("app/handler.rs"), Layer::Service);
        assert_eq!(classify_layer("repo.rs"), Layer::Service);
        assert_eq!(classify_layer("src/repo/mod.rs"), Layer::Repo);
    }

    #[test]
    fn test_priority_order_handler_first() {
        assert_eq!(classify_layer("repo/service/handler/x.rs"), Layer::Handler);
        assert_eq!(classify_layer("repo/service/x.rs"), Layer::Service);
    }

    #[test]
    fn test_unknown_defaults_to_service() {
        assert_eq!(classify_layer("src/util/strings.rs"), Layer::Service);
        assert_eq!(classify_layer(""), Layer::Service);
    }

    #[test]
    fn test_upward_import_direction() {
        assert!(is_upward_import(Layer::Repo, Layer::Service));
        assert!(is_upward_import(Layer::Service, Layer::Handler));
        assert!(is_upward_import(Layer::Repo, Layer::Handler));
        assert!(!is_upward_import(Layer::Handler, Layer::Repo));
        assert!(!is_upward_import(Layer::Service, Layer::Service));
    }

    #[test]
    fn test_repo_to_service_flagged_with_message() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("project/repo/user.rs", "project/service/user.rs");

        let violations = check_layers(&graph);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "project/repo/user.rs");
        assert_eq!(violations[0].to, "project/service/user.rs");
        assert_eq!(
            violations[0].message,
            "project/repo/user.rs (repo) -> project/service/user.rs (service): upward import not allowed"
        );
    }

    #[test]
    fn test_downward_chain_is_clean() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("app/handler/h.rs", "app/service/s.rs");
        graph.add_edge("app/service/s.rs", "app/repo/r.rs");
        graph.add_edge("app/handler/h.rs", "app/repo/r.rs");

        assert!(check_layers(&graph).is_empty());
    }

    #[test]
    fn test_reverse_edges_checked_independently() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a/handler/x.rs", "a/service/y.rs");
        graph.add_edge("a/service/y.rs", "a/handler/x.rs");

        let violations = check_layers(&graph);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].from, "a/service/y.rs");
    }
}
