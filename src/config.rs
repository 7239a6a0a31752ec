//! Configuration file support for deprisk.
//!
//! Provides YAML-based configuration through `deprisk.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "deprisk.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Base URL of the dependency-listing backend.
    pub api_base: Option<String>,
    pub format: Option<String>,
    pub include_transitive: Option<bool>,
    pub include_vuln: Option<bool>,
    pub include_scorecard: Option<bool>,
    pub registries: Option<RegistryOverrides>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Per-ecosystem registry base URL overrides.
#[derive(Debug, Deserialize, Default)]
pub struct RegistryOverrides {
    pub npm: Option<String>,
    pub pypi: Option<String>,
    pub go: Option<String>,
    pub maven: Option<String>,
    pub cargo: Option<String>,
    pub rubygems: Option<String>,
    pub nuget: Option<String>,
    pub composer: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref api_base) = config.api_base {
        if api_base.trim().is_empty() {
            bail!(
                "Invalid config: api_base must not be empty.\n\n\
                 💡 Hint: Set api_base to the explorer backend URL (e.g., \"http://localhost:8080\"), or remove the field."
            );
        }
    }
    if let Some(ref format) = config.format {
        if !matches!(format.as_str(), "tree" | "json" | "dot") {
            bail!(
                "Invalid config: unknown format '{}'.\n\n\
                 💡 Hint: format must be one of 'tree', 'json' or 'dot'.",
                format
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
