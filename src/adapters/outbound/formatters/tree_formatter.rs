use crate::application::dto::ExploreOutcome;
use crate::ports::outbound::{CacheStatus, ReportFormatter};
use crate::risk_graph::domain::{CveRef, DependencyEntry, RiskTier};
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// TreeFormatter adapter rendering the exploration as an indented tree
///
/// Mirrors the listing view: the root line first, direct dependencies
/// under it, transitive dependencies nested under their parents, each
/// line carrying a risk marker and the ranked CVEs. Cycles in the parent
/// attribution are cut per path.
pub struct TreeFormatter {
    color: bool,
}

impl TreeFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn risk_marker(&self, tier: RiskTier) -> String {
        if !self.color {
            return format!("[{}]", tier.label());
        }
        let dot = "●";
        match tier {
            RiskTier::None => dot.dimmed().to_string(),
            RiskTier::Low => dot.green().to_string(),
            RiskTier::Medium => dot.yellow().to_string(),
            RiskTier::High | RiskTier::Critical => dot.red().to_string(),
        }
    }

    fn cve_suffix(&self, cves: &[CveRef]) -> String {
        if cves.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = cves
            .iter()
            .map(|c| format!("{} ({})", c.id, c.score))
            .collect();
        format!("  {}", rendered.join(" "))
    }

    fn write_children(
        &self,
        out: &mut String,
        parent: &str,
        children_of: &HashMap<&str, Vec<&DependencyEntry>>,
        seen: &HashSet<String>,
        depth: usize,
    ) {
        let Some(children) = children_of.get(parent) else {
            return;
        };
        let mut printed: HashSet<String> = HashSet::new();
        for child in children {
            let id = child.node_id();
            if seen.contains(&id) || !printed.insert(id.clone()) {
                continue;
            }
            let _ = writeln!(
                out,
                "{}{} {}{}",
                "  ".repeat(depth),
                self.risk_marker(child.risk),
                id,
                self.cve_suffix(&child.cves)
            );
            let mut child_seen = seen.clone();
            child_seen.insert(id);
            self.write_children(out, &child.name, children_of, &child_seen, depth + 1);
        }
    }
}

impl ReportFormatter for TreeFormatter {
    fn format(&self, outcome: &ExploreOutcome) -> Result<String> {
        let mut out = String::new();

        let cache_note = match outcome.cache {
            Some(CacheStatus::Hit) => "  (cached)",
            _ => "",
        };
        let _ = writeln!(
            out,
            "{} {}{}{}",
            self.risk_marker(outcome.root.tier),
            outcome.root.node_id(),
            self.cve_suffix(&outcome.root.cves),
            cache_note
        );

        let mut children_of: HashMap<&str, Vec<&DependencyEntry>> = HashMap::new();
        for entry in &outcome.entries {
            children_of
                .entry(entry.parent.as_str())
                .or_default()
                .push(entry);
        }
        self.write_children(&mut out, "", &children_of, &HashSet::new(), 1);

        let direct = outcome.entries.iter().filter(|e| !e.transitive).count();
        let transitive: HashSet<String> = outcome
            .entries
            .iter()
            .filter(|e| e.transitive)
            .map(DependencyEntry::node_id)
            .collect();
        let vulnerable: HashSet<String> = outcome
            .entries
            .iter()
            .filter(|e| !e.risk.is_none())
            .map(DependencyEntry::node_id)
            .collect();
        let _ = writeln!(
            out,
            "\n{} direct, {} transitive, {} vulnerable",
            direct,
            transitive.len(),
            vulnerable.len()
        );

        for warning in &outcome.warnings {
            let _ = writeln!(out, "⚠️  {}", warning);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::RootSummary;
    use crate::risk_graph::domain::RiskGraph;
    use std::collections::BTreeMap;

    fn entry(name: &str, version: &str, transitive: bool, parent: &str) -> DependencyEntry {
        DependencyEntry {
            name: name.to_string(),
            version: version.to_string(),
            transitive,
            parent: parent.to_string(),
            cves: Vec::new(),
            risk: RiskTier::None,
        }
    }

    fn outcome(entries: Vec<DependencyEntry>) -> ExploreOutcome {
        ExploreOutcome {
            root: RootSummary {
                name: "app".to_string(),
                version: "1.0.0".to_string(),
                key: "app".to_string(),
                max_score: 0.0,
                cves: Vec::new(),
                tier: RiskTier::None,
            },
            entries,
            graph: RiskGraph::default(),
            repositories: BTreeMap::new(),
            scorecards: BTreeMap::new(),
            cache: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_tree_renders_root_and_nesting() {
        let formatter = TreeFormatter::new(false);
        let rendered = formatter
            .format(&outcome(vec![
                entry("lodash", "4.17.21", false, ""),
                entry("minimist", "1.2.5", true, "lodash"),
            ]))
            .unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains("app@1.0.0"));
        assert!(lines[1].contains("lodash@4.17.21"));
        assert!(lines[2].starts_with("    "));
        assert!(lines[2].contains("minimist@1.2.5"));
    }

    #[test]
    fn test_tree_includes_cves_and_risk_label() {
        let formatter = TreeFormatter::new(false);
        let mut vulnerable = entry("minimist", "1.2.5", false, "");
        vulnerable.cves = vec![CveRef::new("CVE-2021-44906", 9.8)];
        vulnerable.risk = RiskTier::Critical;
        let rendered = formatter.format(&outcome(vec![vulnerable])).unwrap();
        assert!(rendered.contains("[critical]"));
        assert!(rendered.contains("CVE-2021-44906 (9.8)"));
    }

    #[test]
    fn test_tree_cuts_cycles() {
        let formatter = TreeFormatter::new(false);
        let rendered = formatter
            .format(&outcome(vec![
                entry("a", "1.0.0", false, ""),
                entry("b", "1.0.0", true, "a"),
                entry("a", "1.0.0", true, "b"),
            ]))
            .unwrap();
        // "a" appears once at the top level and is not re-expanded under b.
        assert_eq!(rendered.matches("a@1.0.0").count(), 1);
    }

    #[test]
    fn test_tree_summary_counts_unique_packages() {
        let formatter = TreeFormatter::new(false);
        let rendered = formatter
            .format(&outcome(vec![
                entry("a", "1.0.0", false, ""),
                entry("shared", "0.5.0", true, "a"),
                entry("shared", "0.5.0", true, "b"),
            ]))
            .unwrap();
        assert!(rendered.contains("1 direct, 1 transitive, 0 vulnerable"));
    }

    #[test]
    fn test_tree_surfaces_warnings() {
        let formatter = TreeFormatter::new(false);
        let mut o = outcome(vec![]);
        o.warnings
            .push("Request timed out. Some dependencies may be missing.".to_string());
        let rendered = formatter.format(&o).unwrap();
        assert!(rendered.contains("Request timed out"));
    }
}
