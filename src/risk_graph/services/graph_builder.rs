use crate::risk_graph::domain::{DependencyEntry, GraphEdge, GraphNode, RiskGraph, RiskTier};
use std::collections::{HashMap, HashSet};

/// The root package the graph is built around.
#[derive(Debug, Clone)]
pub struct GraphRoot {
    pub name: String,
    pub version: String,
    pub tier: RiskTier,
}

impl GraphRoot {
    pub fn new(name: impl Into<String>, version: impl Into<String>, tier: RiskTier) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tier,
        }
    }

    pub fn node_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// Assembles the deduplicated node/edge graph from the flat listing.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    /// Builds the graph for `entries` rooted at `root`.
    ///
    /// Node ids are unique; the first entry to introduce an id wins and
    /// later disagreements on risk or transitivity are ignored. A
    /// transitive entry whose parent resolves to no known version emits no
    /// edge at all - its node stays in the graph, disconnected.
    pub fn build(entries: &[DependencyEntry], root: &GraphRoot) -> RiskGraph {
        let root_id = root.node_id();

        // Direct subset by name: any non-transitive entry marks the name
        // direct, whatever version it carries.
        let mut direct: HashMap<&str, &str> = HashMap::new();
        for entry in entries {
            if !entry.transitive {
                direct.insert(&entry.name, &entry.version);
            }
        }

        // Parent version resolution map over ALL entries, last-seen-wins.
        let mut versions: HashMap<&str, &str> = HashMap::new();
        for entry in entries {
            versions.insert(&entry.name, &entry.version);
        }

        let mut nodes = vec![GraphNode {
            id: root_id.clone(),
            root: true,
            transitive: false,
            risk: root.tier,
        }];
        let mut edges = Vec::new();
        let mut added: HashSet<String> = HashSet::new();
        added.insert(root_id.clone());

        for entry in entries {
            let id = entry.node_id();
            if !added.contains(&id) {
                nodes.push(GraphNode {
                    id: id.clone(),
                    root: false,
                    transitive: !direct.contains_key(entry.name.as_str()),
                    risk: entry.risk,
                });
                added.insert(id.clone());
            }
            if entry.transitive && !entry.parent.is_empty() {
                let parent_version = versions
                    .get(entry.parent.as_str())
                    .or_else(|| direct.get(entry.parent.as_str()));
                if let Some(pv) = parent_version {
                    edges.push(GraphEdge::new(format!("{}@{}", entry.parent, pv), id));
                }
            } else {
                edges.push(GraphEdge::new(root_id.clone(), id));
            }
        }

        RiskGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk_graph::domain::CveRef;

    fn entry(name: &str, version: &str, transitive: bool, parent: &str) -> DependencyEntry {
        DependencyEntry {
            name: name.to_string(),
            version: version.to_string(),
            transitive,
            parent: parent.to_string(),
            cves: Vec::new(),
            risk: RiskTier::None,
        }
    }

    fn root() -> GraphRoot {
        GraphRoot::new("app", "1.0.0", RiskTier::None)
    }

    #[test]
    fn test_build_always_emits_root() {
        let graph = DependencyGraphBuilder::build(&[], &root());
        assert_eq!(graph.nodes.len(), 1);
        let node = &graph.nodes[0];
        assert_eq!(node.id, "app@1.0.0");
        assert!(node.root);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_build_root_carries_tier() {
        let graph =
            DependencyGraphBuilder::build(&[], &GraphRoot::new("app", "1.0.0", RiskTier::High));
        assert_eq!(graph.root().unwrap().risk, RiskTier::High);
    }

    #[test]
    fn test_build_direct_entry_edges_from_root() {
        let graph = DependencyGraphBuilder::build(&[entry("lodash", "4.17.21", false, "")], &root());
        assert_eq!(graph.nodes.len(), 2);
        assert!(!graph.node("lodash@4.17.21").unwrap().transitive);
        assert_eq!(
            graph.edges,
            vec![GraphEdge::new("app@1.0.0", "lodash@4.17.21")]
        );
    }

    #[test]
    fn test_build_never_duplicates_nodes_first_write_wins() {
        // Same package@version as direct then transitive: one node, with
        // the first entry's view of it.
        let entries = vec![
            entry("lodash", "4.17.21", false, ""),
            {
                let mut e = entry("lodash", "4.17.21", true, "cli");
                e.risk = RiskTier::Critical;
                e
            },
            entry("cli", "1.0.0", false, ""),
        ];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        let lodash_nodes: Vec<_> = graph
            .nodes
            .iter()
            .filter(|n| n.id == "lodash@4.17.21")
            .collect();
        assert_eq!(lodash_nodes.len(), 1);
        assert_eq!(lodash_nodes[0].risk, RiskTier::None);
        assert!(!lodash_nodes[0].transitive);
    }

    #[test]
    fn test_build_fan_in_edges() {
        let entries = vec![
            entry("a", "1.0.0", false, ""),
            entry("b", "2.0.0", true, "a"),
            entry("c", "3.0.0", true, "a"),
        ];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        assert!(graph.edges.contains(&GraphEdge::new("a@1.0.0", "b@2.0.0")));
        assert!(graph.edges.contains(&GraphEdge::new("a@1.0.0", "c@3.0.0")));
        assert_eq!(graph.inbound("b@2.0.0").count(), 1);
        // Neither transitive entry is attached to the root.
        assert_eq!(
            graph
                .edges
                .iter()
                .filter(|e| e.source == "app@1.0.0")
                .count(),
            1
        );
    }

    #[test]
    fn test_build_multiple_parents_single_node() {
        let entries = vec![
            entry("a", "1.0.0", false, ""),
            entry("b", "2.0.0", false, ""),
            entry("shared", "0.5.0", true, "a"),
            entry("shared", "0.5.0", true, "b"),
        ];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        assert_eq!(
            graph.nodes.iter().filter(|n| n.id == "shared@0.5.0").count(),
            1
        );
        assert_eq!(graph.inbound("shared@0.5.0").count(), 2);
    }

    #[test]
    fn test_build_unresolvable_parent_drops_edge_keeps_node() {
        // mkdirp is in no map, so the minimist edge disappears but its
        // node survives, disconnected.
        let entries = vec![entry("lodash", "4.17.21", false, ""), {
            let mut e = entry("minimist", "1.2.5", true, "mkdirp");
            e.cves = vec![CveRef::new("CVE-2021-44906", 9.8)];
            e.risk = RiskTier::Critical;
            e
        }];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(
            graph.edges[0],
            GraphEdge::new("app@1.0.0", "lodash@4.17.21")
        );
        let minimist = graph.node("minimist@1.2.5").unwrap();
        assert_eq!(minimist.risk, RiskTier::Critical);
        assert_eq!(graph.inbound("minimist@1.2.5").count(), 0);
    }

    #[test]
    fn test_build_parent_version_from_transitive_listing() {
        // Parent is itself transitive: its version comes from the
        // all-entries map, not the direct subset.
        let entries = vec![
            entry("a", "1.0.0", false, ""),
            entry("mid", "2.2.2", true, "a"),
            entry("leaf", "3.3.3", true, "mid"),
        ];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        assert!(graph
            .edges
            .contains(&GraphEdge::new("mid@2.2.2", "leaf@3.3.3")));
    }

    #[test]
    fn test_build_last_seen_version_wins_for_parents() {
        let entries = vec![
            entry("dup", "1.0.0", true, "a"),
            entry("dup", "2.0.0", true, "a"),
            entry("a", "0.1.0", false, ""),
            entry("child", "9.9.9", true, "dup"),
        ];
        let graph = DependencyGraphBuilder::build(&entries, &root());
        assert!(graph
            .edges
            .contains(&GraphEdge::new("dup@2.0.0", "child@9.9.9")));
    }

    #[test]
    fn test_build_transitive_without_parent_attaches_to_root() {
        let graph =
            DependencyGraphBuilder::build(&[entry("floating", "1.0.0", true, "")], &root());
        assert_eq!(
            graph.edges,
            vec![GraphEdge::new("app@1.0.0", "floating@1.0.0")]
        );
    }

    #[test]
    fn test_build_order_independent_dedup() {
        // Transitive first, then direct: still one node, first write wins
        // on the transitive flag recorded for it.
        let entries_a = vec![
            entry("p", "1.0.0", true, ""),
            entry("p", "1.0.0", false, ""),
        ];
        let graph_a = DependencyGraphBuilder::build(&entries_a, &root());
        assert_eq!(graph_a.nodes.iter().filter(|n| n.id == "p@1.0.0").count(), 1);
        // The direct subset is computed over all entries before node
        // emission, so even the first (transitive) entry sees p as direct.
        assert!(!graph_a.node("p@1.0.0").unwrap().transitive);
    }
}
