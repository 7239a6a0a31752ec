use clap::Parser;

use crate::adapters::outbound::formatters::{DotFormatter, JsonFormatter, TreeFormatter};
use crate::ports::outbound::ReportFormatter;
use crate::risk_graph::domain::Ecosystem;

#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Tree,
    Json,
    Dot,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(ReportFormat::Tree),
            "json" => Ok(ReportFormat::Json),
            "dot" => Ok(ReportFormat::Dot),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'tree', 'json' or 'dot'",
                s
            )),
        }
    }
}

impl ReportFormat {
    /// Creates a formatter instance for the specified output format
    pub fn create_formatter(&self, color: bool) -> Box<dyn ReportFormatter> {
        match self {
            ReportFormat::Tree => Box::new(TreeFormatter::new(color)),
            ReportFormat::Json => Box::new(JsonFormatter::new()),
            ReportFormat::Dot => Box::new(DotFormatter::new()),
        }
    }
}

/// Explore a package's dependency closure and its vulnerability risk
#[derive(Parser, Debug)]
#[command(name = "deprisk")]
#[command(version)]
#[command(about = "Explore a package's dependency closure and its vulnerability risk", long_about = None)]
pub struct Args {
    /// Package ecosystem: npm, pypi, go, maven, cargo, rubygems, nuget or composer
    pub ecosystem: Ecosystem,

    /// Package name
    pub name: String,

    /// Package version (resolves the latest release when omitted)
    #[arg(id = "pkg-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Namespace: npm scope, maven group, Go module host, composer vendor
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Only list direct dependencies
    #[arg(long)]
    pub no_transitive: bool,

    /// Skip vulnerability enrichment
    #[arg(long)]
    pub no_vuln: bool,

    /// Include OpenSSF Scorecard data
    #[arg(long)]
    pub scorecard: bool,

    /// Output format: tree, json or dot (defaults to tree)
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to a config file (defaults to ./deprisk.config.yml when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Base URL of the dependency-listing backend
    #[arg(long)]
    pub api_base: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_report_format_from_str() {
        assert!(matches!(
            ReportFormat::from_str("tree").unwrap(),
            ReportFormat::Tree
        ));
        assert!(matches!(
            ReportFormat::from_str("JSON").unwrap(),
            ReportFormat::Json
        ));
        assert!(matches!(
            ReportFormat::from_str("Dot").unwrap(),
            ReportFormat::Dot
        ));
    }

    #[test]
    fn test_report_format_from_str_invalid() {
        let result = ReportFormat::from_str("xml");
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("xml"));
    }

    #[test]
    fn test_args_parse_minimal() {
        let args = Args::try_parse_from(["deprisk", "npm", "lodash"]).unwrap();
        assert_eq!(args.ecosystem, Ecosystem::Npm);
        assert_eq!(args.name, "lodash");
        assert!(args.version.is_none());
        assert!(args.format.is_none());
        assert!(!args.no_vuln);
    }

    #[test]
    fn test_args_parse_full() {
        let args = Args::try_parse_from([
            "deprisk",
            "maven",
            "commons-text",
            "1.10.0",
            "--namespace",
            "org.apache.commons",
            "--no-vuln",
            "--format",
            "dot",
        ])
        .unwrap();
        assert_eq!(args.ecosystem, Ecosystem::Maven);
        assert_eq!(args.version.as_deref(), Some("1.10.0"));
        assert_eq!(args.namespace.as_deref(), Some("org.apache.commons"));
        assert!(args.no_vuln);
        assert!(matches!(args.format, Some(ReportFormat::Dot)));
    }

    #[test]
    fn test_args_reject_unknown_ecosystem() {
        let result = Args::try_parse_from(["deprisk", "homebrew", "wget"]);
        assert!(result.is_err());
    }
}
