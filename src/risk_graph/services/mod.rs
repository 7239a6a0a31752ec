pub mod graph_builder;
pub mod risk_scorer;
pub mod vulnerability_aggregator;

pub use graph_builder::{DependencyGraphBuilder, GraphRoot};
pub use risk_scorer::RiskScorer;
pub use vulnerability_aggregator::{RiskSummary, VulnerabilityAggregator};
