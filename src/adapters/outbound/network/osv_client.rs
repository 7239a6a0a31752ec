use crate::ports::outbound::VulnerabilityQuery;
use crate::risk_graph::domain::{Ecosystem, VulnerabilityRecord};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OSV API client for per-package vulnerability lookups
///
/// Used for the supplementary root query when the recursive listing has
/// no vulnerability entry for the root key.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Does not retry failed requests (fail fast, the caller degrades softly)
pub struct OsvQueryClient {
    client: reqwest::Client,
    api_url: String,
}

impl OsvQueryClient {
    const API_ENDPOINT: &'static str = "https://api.osv.dev/v1/query";
    const TIMEOUT_SECONDS: u64 = 30;

    /// Creates a new OSV API client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("deprisk/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: Self::API_ENDPOINT.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(api_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new()?;
        client.api_url = api_url.into();
        Ok(client)
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String, // e.g. "npm", "PyPI", "crates.io"
}

#[derive(Debug, Deserialize)]
struct OsvQueryResponse {
    #[serde(default)]
    vulns: Vec<VulnerabilityRecord>,
}

#[async_trait]
impl VulnerabilityQuery for OsvQueryClient {
    async fn query_vulnerabilities(
        &self,
        ecosystem: Ecosystem,
        package: &str,
        version: &str,
    ) -> Result<Vec<VulnerabilityRecord>> {
        // OSV does not cover every ecosystem we can explore.
        let Some(osv_ecosystem) = ecosystem.osv_name() else {
            return Ok(Vec::new());
        };

        let query = OsvQuery {
            package: OsvPackage {
                name: package.to_string(),
                ecosystem: osv_ecosystem.to_string(),
            },
            version: version.to_string(),
        };

        let response = self.client.post(&self.api_url).json(&query).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let body: OsvQueryResponse = response.json().await?;
        Ok(body.vulns)
    }
}
