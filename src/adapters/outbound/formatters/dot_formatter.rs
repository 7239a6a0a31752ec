use crate::application::dto::ExploreOutcome;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// DotFormatter adapter emitting Graphviz DOT
///
/// One node statement per graph node and one edge statement per edge, so
/// disconnected nodes (unresolvable parents) still show up in the drawing.
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    fn quote(id: &str) -> String {
        format!("\"{}\"", id.replace('"', "\\\""))
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for DotFormatter {
    fn format(&self, outcome: &ExploreOutcome) -> Result<String> {
        let mut out = String::from("digraph deps {\n");
        for node in &outcome.graph.nodes {
            let _ = writeln!(out, "  {};", Self::quote(&node.id));
        }
        for edge in &outcome.graph.edges {
            let _ = writeln!(
                out,
                "  {} -> {};",
                Self::quote(&edge.source),
                Self::quote(&edge.target)
            );
        }
        out.push_str("}\n");
        Ok(out)
    }
}
