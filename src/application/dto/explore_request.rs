use crate::risk_graph::domain::{format_package_key, Ecosystem, PackageCoordinate};
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// What the user asked to explore: the form fields of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreQuery {
    pub ecosystem: Ecosystem,
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    /// Empty means "resolve the latest release first".
    #[serde(default)]
    pub version: Option<String>,
}

impl ExploreQuery {
    pub fn new(ecosystem: Ecosystem, namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            ecosystem,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.version = if version.is_empty() {
            None
        } else {
            Some(version)
        };
        self
    }

    /// The formatted package key for this query.
    pub fn package_key(&self) -> String {
        format_package_key(self.ecosystem, self.namespace.as_deref(), &self.name)
    }

    /// Pins the query to a concrete release.
    pub fn coordinate(&self, version: &str) -> Result<PackageCoordinate> {
        PackageCoordinate::new(
            self.ecosystem,
            self.namespace.clone(),
            self.name.clone(),
            version.to_string(),
        )
    }
}

/// Which enrichments to request alongside the dependency listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreOptions {
    pub include_transitive: bool,
    pub include_vuln: bool,
    pub include_scorecard: bool,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            include_transitive: true,
            include_vuln: true,
            include_scorecard: false,
        }
    }
}

/// One exploration request: query plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreRequest {
    pub query: ExploreQuery,
    pub options: ExploreOptions,
}

impl ExploreRequest {
    pub fn new(query: ExploreQuery, options: ExploreOptions) -> Self {
        Self { query, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_package_key_with_namespace() {
        let query = ExploreQuery::new(Ecosystem::Npm, Some("@babel".to_string()), "core");
        assert_eq!(query.package_key(), "@babel/core");
    }

    #[test]
    fn test_query_empty_version_is_none() {
        let query = ExploreQuery::new(Ecosystem::Cargo, None, "serde").with_version("");
        assert!(query.version.is_none());
    }

    #[test]
    fn test_query_coordinate_pins_version() {
        let query = ExploreQuery::new(Ecosystem::Maven, Some("org.apache".to_string()), "text");
        let coord = query.coordinate("1.10.0").unwrap();
        assert_eq!(coord.key(), "org.apache:text");
        assert_eq!(coord.version(), "1.10.0");
    }

    #[test]
    fn test_options_default() {
        let options = ExploreOptions::default();
        assert!(options.include_transitive);
        assert!(options.include_vuln);
        assert!(!options.include_scorecard);
    }
}
