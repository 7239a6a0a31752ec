use crate::application::dto::{ExploreOutcome, ExploreRequest, RootSummary};
use crate::ports::outbound::{
    DependencyListing, ListingQuery, ListingResponse, ProgressReporter, VersionResolver,
    VulnerabilityQuery,
};
use crate::risk_graph::domain::{DependencyEntry, VulnerabilityRecord};
use crate::risk_graph::services::{DependencyGraphBuilder, GraphRoot, VulnerabilityAggregator};
use crate::shared::error::ExploreError;
use crate::shared::Result;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Shared wall-clock budget for the two listing requests.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Warning surfaced when the budget runs out before both requests settle.
const TIMEOUT_WARNING: &str = "Request timed out. Some dependencies may be missing.";

/// ExploreDependenciesUseCase - resolves, fetches, scores and assembles
/// one exploration cycle.
///
/// Issues the direct-only and recursive listing requests concurrently,
/// joins them under a single timeout, merges the payloads, aggregates
/// per-package risk and hands the result to the graph builder. Each cycle
/// owns its own accumulation state until it returns; a cancelled cycle
/// writes nothing.
///
/// # Type Parameters
/// * `V` - VersionResolver implementation
/// * `L` - DependencyListing implementation
/// * `Q` - VulnerabilityQuery implementation (supplementary root lookup)
/// * `P` - ProgressReporter implementation
pub struct ExploreDependenciesUseCase<V, L, Q, P>
where
    V: VersionResolver,
    L: DependencyListing,
    Q: VulnerabilityQuery,
    P: ProgressReporter,
{
    version_resolver: V,
    listing: L,
    vulnerability_query: Q,
    progress: P,
    timeout: Duration,
}

impl<V, L, Q, P> ExploreDependenciesUseCase<V, L, Q, P>
where
    V: VersionResolver,
    L: DependencyListing,
    Q: VulnerabilityQuery,
    P: ProgressReporter,
{
    pub fn new(version_resolver: V, listing: L, vulnerability_query: Q, progress: P) -> Self {
        Self {
            version_resolver,
            listing,
            vulnerability_query,
            progress,
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Overrides the shared fetch timeout (tests and slow backends).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs one exploration cycle.
    ///
    /// # Errors
    /// * `ExploreError::VersionResolution` when no version can be determined
    /// * `ExploreError::PackageNotFound` / `Upstream` / `UpstreamStatus` for
    ///   fatal listing failures
    /// * `ExploreError::Cancelled` when `cancel` fires first
    pub async fn execute(
        &self,
        request: &ExploreRequest,
        cancel: &CancellationToken,
    ) -> Result<ExploreOutcome> {
        let query = &request.query;
        let options = &request.options;
        if query.name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        let key = query.package_key();
        let version = match &query.version {
            Some(v) => v.clone(),
            None => {
                self.progress.report("Determining version...");
                let resolved = tokio::select! {
                    res = self.version_resolver.resolve_latest(
                        query.ecosystem,
                        query.namespace.as_deref(),
                        &query.name,
                    ) => res.ok().flatten(),
                    _ = cancel.cancelled() => return Err(ExploreError::Cancelled.into()),
                };
                resolved.ok_or_else(|| ExploreError::VersionResolution {
                    package: key.clone(),
                })?
            }
        };
        let coordinate = query.coordinate(&version)?;

        self.progress.report(&format!(
            "Fetching dependencies from {}",
            query.ecosystem.display_name()
        ));
        if options.include_vuln {
            self.progress
                .report("Fetching vulnerabilities from https://osv.dev");
        }
        if options.include_scorecard {
            self.progress
                .report("Fetching reputation from https://api.securityscorecards.dev");
        }

        let direct_query = ListingQuery {
            ecosystem: query.ecosystem,
            namespace: query.namespace.clone(),
            name: query.name.clone(),
            version: version.clone(),
            recursive: false,
            include_vuln: options.include_vuln,
            include_scorecard: options.include_scorecard,
        };
        let full_query = ListingQuery {
            recursive: options.include_transitive,
            ..direct_query.clone()
        };

        let (direct_res, full_res, timed_out) =
            self.fetch_both(&direct_query, &full_query, cancel).await?;

        let mut warnings = Vec::new();
        if timed_out {
            self.progress.report_warning(TIMEOUT_WARNING);
            warnings.push(TIMEOUT_WARNING.to_string());
        }

        self.progress.report("Processing results...");

        let direct = direct_res.unwrap_or_default();
        let full = full_res.unwrap_or_default();
        for body in [&direct.body, &full.body] {
            if !body.is_empty() {
                self.progress.request_line(body);
            }
        }

        let cache = full.cache.or(direct.cache);
        let direct_map = direct.payload.dependencies;
        let all = full.payload.dependencies;
        let parents = full.payload.parents;
        let mut vulns = full.payload.vulnerabilities;

        // The root is absent from its own listing; if the recursive payload
        // carries no entry for it, ask the vulnerability source directly
        // before concluding the root is clean.
        if options.include_vuln && !vulns.contains_key(&key) {
            let extra = tokio::select! {
                res = self.vulnerability_query.query_vulnerabilities(
                    query.ecosystem,
                    &key,
                    &version,
                ) => res.unwrap_or_default(),
                _ = cancel.cancelled() => return Err(ExploreError::Cancelled.into()),
            };
            if !extra.is_empty() {
                vulns.insert(key.clone(), extra);
            }
        }

        let no_vulns: Vec<VulnerabilityRecord> = Vec::new();
        let mut entries = Vec::new();
        for (pkg, ver) in &all {
            let summary =
                VulnerabilityAggregator::aggregate(vulns.get(pkg).unwrap_or(&no_vulns));
            let parent_list = parents
                .get(pkg)
                .map(|p| p.as_list())
                .unwrap_or_else(|| vec![String::new()]);
            for parent in parent_list {
                entries.push(DependencyEntry {
                    name: pkg.clone(),
                    version: ver.clone(),
                    transitive: !direct_map.contains_key(pkg),
                    parent,
                    cves: summary.cves.clone(),
                    risk: summary.tier,
                });
            }
        }

        let root_summary = VulnerabilityAggregator::aggregate(vulns.get(&key).unwrap_or(&no_vulns));
        let root = RootSummary {
            name: coordinate.name().to_string(),
            version: coordinate.version().to_string(),
            key,
            max_score: root_summary.max_score,
            cves: root_summary.cves,
            tier: root_summary.tier,
        };

        let graph = DependencyGraphBuilder::build(
            &entries,
            &GraphRoot::new(root.name.clone(), root.version.clone(), root.tier),
        );

        self.progress.report_completion(&format!(
            "{} packages, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        ));

        Ok(ExploreOutcome {
            root,
            entries,
            graph,
            repositories: full.payload.repositories,
            scorecards: full.payload.scorecards,
            cache,
            warnings,
        })
    }

    /// Runs both listing requests concurrently under one timeout.
    ///
    /// Returns whatever settled successfully plus the timeout flag. A
    /// request that failed is fatal unless the budget ran out, in which
    /// case partial data wins over the error.
    #[allow(clippy::type_complexity)]
    async fn fetch_both(
        &self,
        direct_query: &ListingQuery,
        full_query: &ListingQuery,
        cancel: &CancellationToken,
    ) -> Result<(Option<ListingResponse>, Option<ListingResponse>, bool)> {
        let direct_fut = self.listing.list_dependencies(direct_query);
        let full_fut = self.listing.list_dependencies(full_query);
        tokio::pin!(direct_fut);
        tokio::pin!(full_fut);
        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        let mut direct_res: Option<Result<ListingResponse>> = None;
        let mut full_res: Option<Result<ListingResponse>> = None;
        let mut timed_out = false;

        while direct_res.is_none() || full_res.is_none() {
            tokio::select! {
                res = &mut direct_fut, if direct_res.is_none() => direct_res = Some(res),
                res = &mut full_fut, if full_res.is_none() => full_res = Some(res),
                _ = &mut deadline => {
                    timed_out = true;
                    break;
                }
                _ = cancel.cancelled() => return Err(ExploreError::Cancelled.into()),
            }
        }

        if timed_out {
            // Partial data wins over errors once the budget is gone.
            return Ok((
                direct_res.and_then(|r| r.ok()),
                full_res.and_then(|r| r.ok()),
                true,
            ));
        }

        let direct = match direct_res {
            Some(res) => res?,
            None => ListingResponse::default(),
        };
        let full = match full_res {
            Some(res) => res?,
            None => ListingResponse::default(),
        };
        Ok((Some(direct), Some(full), false))
    }
}
