use crate::ports::outbound::{DependencyListing, VersionResolver};
use crate::risk_graph::domain::Ecosystem;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Trailing-edge debounce window for as-you-type lookups.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer with stale-result suppression.
///
/// Each `run` call supersedes the previous one by cancelling the token it
/// captured at schedule time. A superseded cycle returns `None` - before
/// the lookup if it was still waiting out the window, after it if the
/// supersession happened mid-lookup. Arrival order is never consulted.
pub struct Debouncer {
    window: Duration,
    current: Mutex<CancellationToken>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    fn begin(&self) -> CancellationToken {
        let mut current = self.current.lock().expect("debouncer poisoned");
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    /// Waits out the window, then runs `lookup`. Returns `None` when a
    /// newer cycle started first.
    pub async fn run<F, Fut, T>(&self, lookup: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let token = self.begin();
        tokio::select! {
            _ = token.cancelled() => return None,
            _ = tokio::time::sleep(self.window) => {}
        }
        let value = lookup().await;
        if token.is_cancelled() {
            None
        } else {
            Some(value)
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounced as-you-type lookups: suggested versions and name completion.
///
/// Version and name cycles debounce independently, matching the two
/// independent inputs they feed.
pub struct SuggestionService<V, L>
where
    V: VersionResolver,
    L: DependencyListing,
{
    resolver: V,
    listing: L,
    version_debounce: Debouncer,
    name_debounce: Debouncer,
}

impl<V, L> SuggestionService<V, L>
where
    V: VersionResolver,
    L: DependencyListing,
{
    pub fn new(resolver: V, listing: L) -> Self {
        Self {
            resolver,
            listing,
            version_debounce: Debouncer::new(),
            name_debounce: Debouncer::new(),
        }
    }

    #[cfg(test)]
    fn with_window(resolver: V, listing: L, window: Duration) -> Self {
        Self {
            resolver,
            listing,
            version_debounce: Debouncer::with_window(window),
            name_debounce: Debouncer::with_window(window),
        }
    }

    /// Recent versions of the named package, newest first.
    ///
    /// An empty name clears suggestions immediately, without debouncing.
    pub async fn suggest_versions(
        &self,
        ecosystem: Ecosystem,
        namespace: Option<&str>,
        name: &str,
    ) -> Option<Vec<String>> {
        if name.is_empty() {
            return Some(Vec::new());
        }
        self.version_debounce
            .run(|| async {
                self.resolver
                    .list_versions(ecosystem, namespace, name)
                    .await
                    .unwrap_or_default()
            })
            .await
    }

    /// Package names completing the typed prefix.
    pub async fn suggest_names(&self, ecosystem: Ecosystem, prefix: &str) -> Option<Vec<String>> {
        if prefix.is_empty() {
            return Some(Vec::new());
        }
        self.name_debounce
            .run(|| async {
                self.listing
                    .suggest_packages(ecosystem, prefix)
                    .await
                    .unwrap_or_default()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ListingQuery, ListingResponse};
    use crate::shared::Result;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubResolver {
        versions: Vec<String>,
    }

    #[async_trait]
    impl VersionResolver for StubResolver {
        async fn resolve_latest(
            &self,
            _ecosystem: Ecosystem,
            _namespace: Option<&str>,
            _name: &str,
        ) -> Result<Option<String>> {
            Ok(self.versions.first().cloned())
        }

        async fn list_versions(
            &self,
            _ecosystem: Ecosystem,
            _namespace: Option<&str>,
            _name: &str,
        ) -> Result<Vec<String>> {
            Ok(self.versions.clone())
        }
    }

    struct StubListing;

    #[async_trait]
    impl DependencyListing for StubListing {
        async fn list_dependencies(&self, _query: &ListingQuery) -> Result<ListingResponse> {
            Ok(ListingResponse::default())
        }

        async fn suggest_packages(
            &self,
            _ecosystem: Ecosystem,
            prefix: &str,
        ) -> Result<Vec<String>> {
            Ok(vec![format!("{}-suggestion", prefix)])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_delivers_after_window() {
        let debouncer = Debouncer::with_window(Duration::from_millis(500));
        let result = debouncer.run(|| async { 42 }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_discards_superseded_cycle() {
        let debouncer = Arc::new(Debouncer::with_window(Duration::from_millis(500)));
        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.run(|| async { "first" }).await })
        };
        // Let the first cycle capture its token before superseding it.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.run(|| async { "second" }).await;
        assert_eq!(second, Some("second"));
        assert_eq!(first.await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggest_versions_empty_name_clears_immediately() {
        let service = SuggestionService::with_window(
            StubResolver {
                versions: vec!["2.0.0".to_string()],
            },
            StubListing,
            Duration::from_millis(500),
        );
        let result = service
            .suggest_versions(Ecosystem::Cargo, None, "")
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggest_versions_returns_listing() {
        let service = SuggestionService::with_window(
            StubResolver {
                versions: vec!["2.0.0".to_string(), "1.0.0".to_string()],
            },
            StubListing,
            Duration::from_millis(500),
        );
        let result = service
            .suggest_versions(Ecosystem::Cargo, None, "serde")
            .await
            .unwrap();
        assert_eq!(result, vec!["2.0.0".to_string(), "1.0.0".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggest_names_uses_prefix() {
        let service = SuggestionService::with_window(
            StubResolver { versions: vec![] },
            StubListing,
            Duration::from_millis(500),
        );
        let result = service.suggest_names(Ecosystem::Npm, "lod").await.unwrap();
        assert_eq!(result, vec!["lod-suggestion".to_string()]);
    }
}
