use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk classification derived from a numeric severity score.
///
/// Ordered: `None < Low < Medium < High < Critical`. Dispatch on risk must
/// go through this enum, never through string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    /// Maps a worst-case score to its tier.
    ///
    /// NaN compares false against every threshold and lands on `None`,
    /// which is what an unknown severity must map to - unknown is not a
    /// risk level, and it is not zero risk either; callers that need the
    /// distinction keep the raw score alongside.
    pub fn from_score(score: f64) -> RiskTier {
        if score >= 9.0 {
            RiskTier::Critical
        } else if score >= 7.0 {
            RiskTier::High
        } else if score >= 4.0 {
            RiskTier::Medium
        } else if score > 0.0 {
            RiskTier::Low
        } else {
            RiskTier::None
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RiskTier::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::None => "none",
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
