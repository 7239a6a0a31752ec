use crate::ports::outbound::{DependencyListing, ListingQuery, ListingResponse};
use crate::risk_graph::domain::Ecosystem;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingDependencyListing wraps a DependencyListing and adds in-memory
/// caching of listing responses.
///
/// Decorator over any DependencyListing implementation; the cache is
/// thread-safe and keyed by the full query, so the direct and recursive
/// variants of the same package cache independently. Suggestions pass
/// through uncached - they are prefix lookups the user is still typing.
pub struct CachingDependencyListing<L: DependencyListing> {
    inner: L,
    cache: Arc<DashMap<ListingQuery, ListingResponse>>,
}

impl<L: DependencyListing> CachingDependencyListing<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<L: DependencyListing> DependencyListing for CachingDependencyListing<L> {
    async fn list_dependencies(&self, query: &ListingQuery) -> Result<ListingResponse> {
        if let Some(cached) = self.cache.get(query) {
            return Ok(cached.clone());
        }

        let response = self.inner.list_dependencies(query).await?;
        self.cache.insert(query.clone(), response.clone());
        Ok(response)
    }

    async fn suggest_packages(&self, ecosystem: Ecosystem, prefix: &str) -> Result<Vec<String>> {
        self.inner.suggest_packages(ecosystem, prefix).await
    }
}
