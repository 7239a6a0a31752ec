//! deprisk - dependency risk explorer
//!
//! This library walks a package's dependency closure and renders a risk
//! picture of it: which direct and transitive packages exist, which carry
//! known vulnerabilities, and how severe those vulnerabilities are.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`risk_graph`): severity scoring, per-package
//!   aggregation, and graph assembly - pure logic, no I/O
//! - **Application Layer** (`application`): the fetch use case, session
//!   navigation with history, and debounced suggestion lookups
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): registry clients, the listing backend
//!   client, the OSV client, console output, and report formatters
//! - **Shared** (`shared`): common Result alias and error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use deprisk::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let resolver = RegistryVersionResolver::new()?;
//! let listing = CachingDependencyListing::new(
//!     HttpDependencyListing::new("http://localhost:8080")?,
//! );
//! let osv = OsvQueryClient::new()?;
//!
//! let use_case = ExploreDependenciesUseCase::new(
//!     resolver,
//!     listing,
//!     osv,
//!     SilentProgressReporter,
//! );
//! let session = SessionContext::new(
//!     ExploreQuery::new(Ecosystem::Npm, None, ""),
//!     ExploreOptions::default(),
//! );
//! let mut controller = NavigationController::new(use_case, session);
//!
//! let query = ExploreQuery::new(Ecosystem::Npm, None, "lodash");
//! if let Some(outcome) = controller.submit(query).await? {
//!     println!("{} nodes", outcome.graph.nodes.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod risk_graph;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{DotFormatter, JsonFormatter, TreeFormatter};
    pub use crate::adapters::outbound::network::{
        CachingDependencyListing, HttpDependencyListing, OsvQueryClient, RegistryEndpoints,
        RegistryVersionResolver,
    };
    pub use crate::application::dto::{
        ExploreOptions, ExploreOutcome, ExploreQuery, ExploreRequest, RootSummary,
    };
    pub use crate::application::navigation::{
        CancelHandle, HistoryFrame, NavigationController, SessionContext, SessionState,
    };
    pub use crate::application::suggestions::{Debouncer, SuggestionService};
    pub use crate::application::use_cases::ExploreDependenciesUseCase;
    pub use crate::ports::outbound::{
        CacheStatus, DependencyListing, ListingPayload, ListingQuery, ListingResponse,
        OutputPresenter, ProgressReporter, ReportFormatter, SilentProgressReporter,
        VersionResolver, VulnerabilityQuery,
    };
    pub use crate::risk_graph::domain::{
        CveRef, DependencyEntry, Ecosystem, GraphEdge, GraphNode, PackageCoordinate, RiskGraph,
        RiskTier, SeverityRecord, VulnerabilityRecord,
    };
    pub use crate::risk_graph::services::{
        DependencyGraphBuilder, GraphRoot, RiskScorer, VulnerabilityAggregator,
    };
    pub use crate::shared::error::ExploreError;
    pub use crate::shared::Result;
}
