/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registries, the listing backend,
/// the vulnerability source, console, output destinations).
pub mod dependency_listing;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod version_resolver;
pub mod vulnerability_query;

pub use dependency_listing::{
    CacheStatus, DependencyListing, ListingPayload, ListingQuery, ListingResponse, ParentRefs,
};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::{ProgressReporter, SilentProgressReporter};
pub use report_formatter::ReportFormatter;
pub use version_resolver::VersionResolver;
pub use vulnerability_query::VulnerabilityQuery;
