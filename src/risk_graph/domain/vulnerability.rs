use serde::{Deserialize, Serialize};

/// One severity entry on a vulnerability, as the OSV schema carries them.
///
/// The `score` field is heterogeneous in the wild: a plain number, a
/// decimal rendered as a string, or a full CVSS vector string. An absent
/// or unrecognizable score means the severity is *unknown*, which must
/// never be conflated with "no vulnerability".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<SeverityScore>,
}

/// The raw score value before interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityScore {
    Number(f64),
    Text(String),
}

impl SeverityRecord {
    pub fn numeric(score: f64) -> Self {
        Self {
            score: Some(SeverityScore::Number(score)),
        }
    }

    pub fn text(score: impl Into<String>) -> Self {
        Self {
            score: Some(SeverityScore::Text(score.into())),
        }
    }

    pub fn missing() -> Self {
        Self { score: None }
    }
}

/// One advisory affecting a package, as returned by OSV.
///
/// A record contributes to a package's CVE ranking under every identifier
/// in `{id} ∪ aliases` that looks like a CVE; non-CVE identifiers still
/// contribute to the package's worst-case score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub severity: Vec<SeverityRecord>,
}

impl VulnerabilityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aliases: Vec::new(),
            severity: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_severity(mut self, severity: Vec<SeverityRecord>) -> Self {
        self.severity = severity;
        self
    }

    /// Every CVE identifier this record carries, primary id first.
    pub fn cve_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|id| id.starts_with("CVE-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_deserializes_numeric_score() {
        let rec: SeverityRecord = serde_json::from_str(r#"{"score": 9.8}"#).unwrap();
        assert_eq!(rec.score, Some(SeverityScore::Number(9.8)));
    }

    #[test]
    fn test_severity_deserializes_vector_string() {
        let rec: SeverityRecord =
            serde_json::from_str(r#"{"score": "CVSS:3.1/AV:N/AC:L"}"#).unwrap();
        assert_eq!(
            rec.score,
            Some(SeverityScore::Text("CVSS:3.1/AV:N/AC:L".to_string()))
        );
    }

    #[test]
    fn test_severity_deserializes_missing_score() {
        let rec: SeverityRecord = serde_json::from_str(r#"{"type": "CVSS_V3"}"#).unwrap();
        assert_eq!(rec.score, None);
    }

    #[test]
    fn test_vulnerability_defaults() {
        let rec: VulnerabilityRecord = serde_json::from_str(r#"{"id": "CVE-2024-1"}"#).unwrap();
        assert!(rec.aliases.is_empty());
        assert!(rec.severity.is_empty());
    }

    #[test]
    fn test_cve_ids_filters_non_cve() {
        let rec = VulnerabilityRecord::new("GHSA-xxxx-yyyy-zzzz").with_aliases(vec![
            "CVE-2021-44906".to_string(),
            "SNYK-JS-MINIMIST-2429795".to_string(),
        ]);
        let ids: Vec<&str> = rec.cve_ids().collect();
        assert_eq!(ids, vec!["CVE-2021-44906"]);
    }

    #[test]
    fn test_cve_ids_primary_first() {
        let rec = VulnerabilityRecord::new("CVE-2024-0001")
            .with_aliases(vec!["CVE-2024-0002".to_string()]);
        let ids: Vec<&str> = rec.cve_ids().collect();
        assert_eq!(ids, vec!["CVE-2024-0001", "CVE-2024-0002"]);
    }
}
