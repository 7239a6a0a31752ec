use crate::ports::outbound::{
    CacheStatus, DependencyListing, ListingPayload, ListingQuery, ListingResponse,
    ProgressReporter,
};
use crate::risk_graph::domain::Ecosystem;
use crate::shared::error::ExploreError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Response header carrying the backend's cache verdict.
const CACHE_HEADER: &str = "X-Cache-Status";

/// HttpDependencyListing adapter for the explorer backend
///
/// Fetches dependency listings from the aggregation backend that walks
/// the registries server-side, and package-name suggestions from its
/// suggest endpoint. The raw body text is kept on every response so the
/// caller can log it; bodies that fail to parse degrade to an empty
/// payload rather than failing the fetch.
pub struct HttpDependencyListing {
    client: reqwest::Client,
    base_url: String,
    reporter: Option<Arc<dyn ProgressReporter>>,
}

impl HttpDependencyListing {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("deprisk/{}", version);
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            reporter: None,
        })
    }

    /// Routes request lines (`> GET …`) to a progress reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    fn log_request(&self, url: &str) {
        if let Some(reporter) = &self.reporter {
            reporter.request_line(&format!("> GET {}", url));
        }
    }

    fn listing_url(&self, query: &ListingQuery) -> String {
        let base = format!("{}/dependencies/{}", self.base_url, query.ecosystem.id());
        let path = match query.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("{}/{}/{}/{}", base, ns, query.name, query.version),
            None => format!("{}/{}/{}", base, query.name, query.version),
        };
        format!(
            "{}?recursive={}&vuln={}&scorecard={}",
            path, query.recursive, query.include_vuln, query.include_scorecard
        )
    }
}

/// Suggestion entries arrive either as bare strings or `{name}` objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestEntry {
    Named { name: String },
    Plain(String),
}

impl SuggestEntry {
    fn into_name(self) -> String {
        match self {
            SuggestEntry::Named { name } => name,
            SuggestEntry::Plain(name) => name,
        }
    }
}

#[async_trait]
impl DependencyListing for HttpDependencyListing {
    async fn list_dependencies(&self, query: &ListingQuery) -> Result<ListingResponse> {
        let url = self.listing_url(query);
        self.log_request(&url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(60))
            .send()
            .await?;
        let status = response.status();
        let cache = response
            .headers()
            .get(CACHE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(CacheStatus::from_header);
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ExploreError::from_status(status.as_u16(), &body).into());
        }

        let payload: ListingPayload = serde_json::from_str(&body).unwrap_or_default();
        Ok(ListingResponse {
            payload,
            cache,
            body,
        })
    }

    async fn suggest_packages(&self, ecosystem: Ecosystem, prefix: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/suggest/{}/{}",
            self.base_url,
            ecosystem.id(),
            urlencoding::encode(prefix)
        );
        self.log_request(&url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(Vec::new());
        }
        let entries: Vec<SuggestEntry> = response.json().await.unwrap_or_default();
        Ok(entries.into_iter().map(SuggestEntry::into_name).collect())
    }
}
