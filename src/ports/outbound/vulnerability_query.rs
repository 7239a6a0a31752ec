use crate::risk_graph::domain::{Ecosystem, VulnerabilityRecord};
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityQuery port for direct per-package advisory lookups
///
/// Used for the supplementary root lookup when the recursive listing
/// carries no vulnerability entry for the root key.
#[async_trait]
pub trait VulnerabilityQuery: Send + Sync {
    /// Queries advisories for one package release.
    ///
    /// `package` is the formatted package key (maven `group:artifact`,
    /// scoped `ns/name`, or a bare name). Ecosystems the vulnerability
    /// source does not cover return an empty vec.
    async fn query_vulnerabilities(
        &self,
        ecosystem: Ecosystem,
        package: &str,
        version: &str,
    ) -> Result<Vec<VulnerabilityRecord>>;
}
