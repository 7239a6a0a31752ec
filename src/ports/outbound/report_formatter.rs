use crate::application::dto::ExploreOutcome;
use crate::shared::Result;

/// ReportFormatter port for turning an exploration outcome into text
///
/// Implementations render the node/edge model; none of them draw - the
/// engine's output is always text handed to an external consumer.
pub trait ReportFormatter {
    /// Formats the outcome of one exploration.
    fn format(&self, outcome: &ExploreOutcome) -> Result<String>;
}
