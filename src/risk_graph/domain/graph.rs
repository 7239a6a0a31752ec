use super::risk::RiskTier;
use serde::{Deserialize, Serialize};

/// One node of the exploration graph, unique per `name@version` id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub transitive: bool,
    pub risk: RiskTier,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The deduplicated node/edge model handed to external renderers.
///
/// The engine guarantees node ids are unique; edges may fan in to a node
/// from multiple parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RiskGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.root)
    }

    /// Edges pointing at the given node id.
    pub fn inbound<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }
}
