use crate::application::dto::{ExploreOutcome, RootSummary};
use crate::ports::outbound::{CacheStatus, ReportFormatter};
use crate::risk_graph::domain::{DependencyEntry, RiskGraph};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// JsonFormatter adapter producing the machine-readable report
///
/// Serializes the full exploration outcome - graph, entries, root
/// summary, passthrough maps - under a small metadata envelope.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: ToolInfo,
    generated_at: DateTime<Utc>,
    root: &'a RootSummary,
    graph: &'a RiskGraph,
    dependencies: &'a [DependencyEntry],
    repositories: &'a BTreeMap<String, String>,
    scorecards: &'a BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache: Option<CacheStatus>,
    warnings: &'a [String],
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, outcome: &ExploreOutcome) -> Result<String> {
        let report = JsonReport {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            generated_at: Utc::now(),
            root: &outcome.root,
            graph: &outcome.graph,
            dependencies: &outcome.entries,
            repositories: &outcome.repositories,
            scorecards: &outcome.scorecards,
            cache: outcome.cache,
            warnings: &outcome.warnings,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk_graph::domain::{CveRef, GraphEdge, GraphNode, RiskTier};

    fn outcome() -> ExploreOutcome {
        ExploreOutcome {
            root: RootSummary {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                key: "app".to_string(),
                max_score: 9.8,
                cves: vec![CveRef::new("CVE-2024-9999", 9.8)],
                tier: RiskTier::Critical,
            },
            entries: vec![DependencyEntry {
                name: "lodash".to_string(),
                version: "4.17.21".to_string(),
                transitive: false,
                parent: String::new(),
                cves: Vec::new(),
                risk: RiskTier::None,
            }],
            graph: RiskGraph {
                nodes: vec![GraphNode {
                    id: "app@1.0.0".to_string(),
                    root: true,
                    transitive: false,
                    risk: RiskTier::Critical,
                }],
                edges: vec![GraphEdge::new("app@1.0.0", "lodash@4.17.21")],
            },
            repositories: BTreeMap::new(),
            scorecards: BTreeMap::new(),
            cache: Some(CacheStatus::Hit),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_json_report_round_trips() {
        let rendered = JsonFormatter::new().format(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["tool"]["name"], "deprisk");
        assert_eq!(value["root"]["tier"], "critical");
        assert_eq!(value["graph"]["nodes"][0]["id"], "app@1.0.0");
        assert_eq!(value["graph"]["edges"][0]["target"], "lodash@4.17.21");
        assert_eq!(value["dependencies"][0]["name"], "lodash");
    }

    #[test]
    fn test_json_report_has_timestamp() {
        let rendered = JsonFormatter::new().format(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["generated_at"].as_str().is_some());
    }
}
