pub mod coordinate;
pub mod dependency;
pub mod graph;
pub mod risk;
pub mod vulnerability;

pub use coordinate::{format_package_key, split_package_key, Ecosystem, PackageCoordinate};
pub use dependency::{CveRef, DependencyEntry};
pub use graph::{GraphEdge, GraphNode, RiskGraph};
pub use risk::RiskTier;
pub use vulnerability::{SeverityRecord, SeverityScore, VulnerabilityRecord};
