use crate::risk_graph::domain::{Ecosystem, VulnerabilityRecord};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Parameters for one dependency-listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    pub ecosystem: Ecosystem,
    pub namespace: Option<String>,
    pub name: String,
    pub version: String,
    pub recursive: bool,
    pub include_vuln: bool,
    pub include_scorecard: bool,
}

/// Parent attribution values arrive as either one key or a list of keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentRefs {
    One(String),
    Many(Vec<String>),
}

impl ParentRefs {
    /// Normalizes to a list; a missing/empty attribution is the root.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            ParentRefs::One(p) => vec![p.clone()],
            ParentRefs::Many(ps) => ps.clone(),
        }
    }
}

/// The parsed body of a listing response.
///
/// All fields default to empty so partial or unparsable payloads degrade
/// to an empty listing instead of failing the fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub parents: HashMap<String, ParentRefs>,
    #[serde(default)]
    pub vulnerabilities: HashMap<String, Vec<VulnerabilityRecord>>,
    #[serde(default)]
    pub repositories: BTreeMap<String, String>,
    #[serde(default)]
    pub scorecards: BTreeMap<String, serde_json::Value>,
}

/// Whether the backend served the listing from its cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn from_header(value: &str) -> Option<CacheStatus> {
        match value {
            "HIT" => Some(CacheStatus::Hit),
            "MISS" => Some(CacheStatus::Miss),
            _ => None,
        }
    }
}

/// A listing response: parsed payload plus the metadata the caller needs
/// for diagnostics (cache signal, raw body text).
#[derive(Debug, Clone, Default)]
pub struct ListingResponse {
    pub payload: ListingPayload,
    pub cache: Option<CacheStatus>,
    pub body: String,
}

/// DependencyListing port for the explorer backend
///
/// One implementation per transport; the engine only sees parsed shapes.
#[async_trait]
pub trait DependencyListing: Send + Sync {
    /// Fetches the dependency listing for one package release.
    async fn list_dependencies(&self, query: &ListingQuery) -> Result<ListingResponse>;

    /// Package-name completion for a prefix the user is typing.
    async fn suggest_packages(&self, ecosystem: Ecosystem, prefix: &str) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_refs_one_or_many() {
        let one: ParentRefs = serde_json::from_str(r#""mkdirp""#).unwrap();
        assert_eq!(one.as_list(), vec!["mkdirp".to_string()]);

        let many: ParentRefs = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many.as_list(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_payload_all_fields_default() {
        let payload: ListingPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.dependencies.is_empty());
        assert!(payload.parents.is_empty());
        assert!(payload.vulnerabilities.is_empty());
    }

    #[test]
    fn test_payload_parses_backend_shape() {
        let payload: ListingPayload = serde_json::from_str(
            r#"{
                "dependencies": {"lodash": "4.17.21", "minimist": "1.2.5"},
                "parents": {"minimist": ["mkdirp"]},
                "vulnerabilities": {"minimist": [{"id": "CVE-2021-44906"}]},
                "repositories": {"lodash": "github.com/lodash/lodash"}
            }"#,
        )
        .unwrap();
        assert_eq!(payload.dependencies.len(), 2);
        assert_eq!(
            payload.parents["minimist"].as_list(),
            vec!["mkdirp".to_string()]
        );
        assert_eq!(payload.vulnerabilities["minimist"][0].id, "CVE-2021-44906");
    }

    #[test]
    fn test_cache_status_from_header() {
        assert_eq!(CacheStatus::from_header("HIT"), Some(CacheStatus::Hit));
        assert_eq!(CacheStatus::from_header("MISS"), Some(CacheStatus::Miss));
        assert_eq!(CacheStatus::from_header(""), None);
    }
}
