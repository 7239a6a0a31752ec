use crate::risk_graph::domain::{RiskTier, SeverityRecord, SeverityScore};
use std::collections::HashMap;

/// Scores heterogeneous severity records.
///
/// A record's score may be a plain number, a decimal in a string, or a
/// CVSS v3.1 vector string. Anything else scores NaN - unknown, which
/// callers must keep distinct from 0.0 ("scored, harmless").
pub struct RiskScorer;

impl RiskScorer {
    /// Returns the numeric score for one severity record, NaN if unscorable.
    pub fn score(record: &SeverityRecord) -> f64 {
        match &record.score {
            None => f64::NAN,
            Some(SeverityScore::Number(n)) => *n,
            Some(SeverityScore::Text(s)) => {
                if let Ok(n) = s.trim().parse::<f64>() {
                    return n;
                }
                if s.starts_with("CVSS:") {
                    return cvss_v3_base_score(s);
                }
                f64::NAN
            }
        }
    }

    /// Maps a worst-case score to its risk tier. NaN never raises a tier.
    pub fn tier(score: f64) -> RiskTier {
        RiskTier::from_score(score)
    }
}

/// Computes the CVSS v3.1 base score from a vector string.
///
/// Malformed `METRIC:VALUE` pairs are skipped and unknown metric values
/// weigh 0.0, so a partial vector still produces a (conservatively low
/// exploitability, but never under-rounded) score rather than failing.
/// The final score is rounded *up* to one decimal: severities must never
/// be under-reported.
fn cvss_v3_base_score(vector: &str) -> f64 {
    let metrics: HashMap<&str, &str> = vector
        .split('/')
        .filter_map(|part| {
            let idx = part.find(':')?;
            if idx == 0 {
                return None;
            }
            Some((&part[..idx], &part[idx + 1..]))
        })
        .collect();

    let lookup = |metric: &str, table: &[(&str, f64)]| -> f64 {
        let value = metrics.get(metric).copied().unwrap_or("");
        table
            .iter()
            .find(|(code, _)| *code == value)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    };

    let av = lookup("AV", &[("N", 0.85), ("A", 0.62), ("L", 0.55), ("P", 0.2)]);
    let ac = lookup("AC", &[("L", 0.77), ("H", 0.44)]);
    let ui = lookup("UI", &[("N", 0.85), ("R", 0.62)]);
    let scope_changed = metrics.get("S").copied() == Some("C");
    let pr = if scope_changed {
        lookup("PR", &[("N", 0.85), ("L", 0.68), ("H", 0.5)])
    } else {
        lookup("PR", &[("N", 0.85), ("L", 0.62), ("H", 0.27)])
    };
    let impact_table: &[(&str, f64)] = &[("N", 0.0), ("L", 0.22), ("H", 0.56)];
    let c = lookup("C", impact_table);
    let i = lookup("I", impact_table);
    let a = lookup("A", impact_table);

    let isc_base = 1.0 - (1.0 - c) * (1.0 - i) * (1.0 - a);
    let impact = if scope_changed {
        7.52 * (isc_base - 0.029) - 3.25 * (isc_base - 0.02).powi(15)
    } else {
        6.42 * isc_base
    };
    if impact <= 0.0 {
        return 0.0;
    }

    let exploitability = 8.22 * av * ac * pr * ui;
    let score = if scope_changed {
        f64::min(1.08 * (impact + exploitability), 10.0)
    } else {
        f64::min(impact + exploitability, 10.0)
    };

    (score * 10.0).ceil() / 10.0
}
