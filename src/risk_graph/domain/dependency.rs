use super::risk::RiskTier;
use serde::{Deserialize, Serialize};

/// One ranked CVE reference on a package: identifier plus its worst score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CveRef {
    pub id: String,
    pub score: f64,
}

impl CveRef {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// One row of the flat dependency listing, attributed to a single parent.
///
/// Produced once per (package, parent) pair: a package reachable through
/// two parents yields two entries that share identical cves and risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEntry {
    /// Package key as the listing backend formats it.
    pub name: String,
    pub version: String,
    /// True when the package is only reachable through another dependency.
    pub transitive: bool,
    /// Parent package key; empty means attributed to the root.
    #[serde(default)]
    pub parent: String,
    /// Up to five CVEs, ranked by score descending.
    #[serde(default)]
    pub cves: Vec<CveRef>,
    pub risk: RiskTier,
}

impl DependencyEntry {
    pub fn node_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}
