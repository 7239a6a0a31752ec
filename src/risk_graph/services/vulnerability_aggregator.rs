use super::risk_scorer::RiskScorer;
use crate::risk_graph::domain::{CveRef, RiskTier, VulnerabilityRecord};

/// Maximum number of ranked CVEs kept per package.
const MAX_RANKED_CVES: usize = 5;

/// A package's aggregated risk: worst score, ranked CVEs, and tier.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub max_score: f64,
    pub cves: Vec<CveRef>,
    pub tier: RiskTier,
}

impl RiskSummary {
    pub fn empty() -> Self {
        Self {
            max_score: 0.0,
            cves: Vec::new(),
            tier: RiskTier::None,
        }
    }
}

/// Reduces a package's vulnerability list to a bounded, ranked risk picture.
pub struct VulnerabilityAggregator;

impl VulnerabilityAggregator {
    /// Aggregates all records for one package.
    ///
    /// Each record's own worst score is the maximum over its severities,
    /// skipping NaN entries; a record whose severities are all unscorable
    /// counts as 0, not NaN. CVE identifiers (the record id plus any
    /// `CVE-*` aliases) keep the maximum score seen across records, in
    /// first-seen order. The package max spans every record, CVE or not.
    pub fn aggregate(vulns: &[VulnerabilityRecord]) -> RiskSummary {
        let mut cve_scores: Vec<(String, f64)> = Vec::new();
        let mut max_score: f64 = 0.0;

        for record in vulns {
            let mut record_worst: f64 = 0.0;
            for severity in &record.severity {
                let score = RiskScorer::score(severity);
                if !score.is_nan() && score > record_worst {
                    record_worst = score;
                }
            }
            if record_worst > max_score {
                max_score = record_worst;
            }
            for id in record.cve_ids() {
                match cve_scores.iter_mut().find(|(seen, _)| seen == id) {
                    Some((_, score)) => *score = score.max(record_worst),
                    None => cve_scores.push((id.to_string(), record_worst)),
                }
            }
        }

        // Stable sort keeps insertion order for ties.
        cve_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let cves = cve_scores
            .into_iter()
            .take(MAX_RANKED_CVES)
            .map(|(id, score)| CveRef::new(id, score))
            .collect();

        RiskSummary {
            max_score,
            cves,
            tier: RiskScorer::tier(max_score),
        }
    }
}
