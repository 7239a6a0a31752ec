use crate::risk_graph::domain::Ecosystem;
use crate::shared::Result;
use async_trait::async_trait;

/// VersionResolver port for registry version lookups
///
/// Abstracts the per-ecosystem registry endpoints that answer "what is the
/// latest release?" and "which releases exist?".
#[async_trait]
pub trait VersionResolver: Send + Sync {
    /// Resolves the latest published version of a package.
    ///
    /// # Returns
    /// `Ok(None)` when the registry answered but knows no such package or
    /// carries no usable version; resolution errors are soft and also
    /// reported as `None` by implementations that cannot distinguish.
    async fn resolve_latest(
        &self,
        ecosystem: Ecosystem,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>>;

    /// Lists recent versions, newest first, for suggestion dropdowns.
    ///
    /// Ecosystems without a listing endpoint return an empty vec.
    async fn list_versions(
        &self,
        ecosystem: Ecosystem,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Vec<String>>;
}
