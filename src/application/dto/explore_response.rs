use crate::ports::outbound::CacheStatus;
use crate::risk_graph::domain::{CveRef, DependencyEntry, RiskGraph, RiskTier};
use serde::Serialize;
use std::collections::BTreeMap;

/// The root package's own risk picture.
#[derive(Debug, Clone, Serialize)]
pub struct RootSummary {
    /// Bare package name; the root graph node id is `{name}@{version}`.
    pub name: String,
    pub version: String,
    /// Formatted key, used for vulnerability map lookups.
    pub key: String,
    pub max_score: f64,
    pub cves: Vec<CveRef>,
    pub tier: RiskTier,
}

impl RootSummary {
    pub fn node_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// Everything one successful exploration produced.
///
/// Recomputed wholesale on every fetch; nothing here survives a new root
/// query.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreOutcome {
    pub root: RootSummary,
    pub entries: Vec<DependencyEntry>,
    pub graph: RiskGraph,
    pub repositories: BTreeMap<String, String>,
    pub scorecards: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStatus>,
    /// Non-fatal notices (e.g. the shared timeout fired).
    pub warnings: Vec<String>,
}
