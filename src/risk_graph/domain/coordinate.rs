use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package ecosystems the explorer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Pypi,
    Go,
    Maven,
    Cargo,
    Rubygems,
    Nuget,
    Composer,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 8] = [
        Ecosystem::Npm,
        Ecosystem::Pypi,
        Ecosystem::Go,
        Ecosystem::Maven,
        Ecosystem::Cargo,
        Ecosystem::Rubygems,
        Ecosystem::Nuget,
        Ecosystem::Composer,
    ];

    /// Lowercase identifier used in URLs and config keys.
    pub fn id(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Go => "go",
            Ecosystem::Maven => "maven",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Rubygems => "rubygems",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Composer => "composer",
        }
    }

    /// Human-readable name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "NPM",
            Ecosystem::Pypi => "PyPI",
            Ecosystem::Go => "Go modules",
            Ecosystem::Maven => "Maven",
            Ecosystem::Cargo => "Cargo",
            Ecosystem::Rubygems => "RubyGems",
            Ecosystem::Nuget => "NuGet",
            Ecosystem::Composer => "Composer",
        }
    }

    /// The ecosystem name OSV expects in query payloads.
    ///
    /// OSV only covers a subset of the ecosystems we can explore; the rest
    /// return `None` and vulnerability lookups for them yield nothing.
    pub fn osv_name(&self) -> Option<&'static str> {
        match self {
            Ecosystem::Npm => Some("npm"),
            Ecosystem::Pypi => Some("PyPI"),
            Ecosystem::Go => Some("Go"),
            Ecosystem::Maven => Some("Maven"),
            Ecosystem::Cargo => Some("crates.io"),
            _ => None,
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            "pypi" => Ok(Ecosystem::Pypi),
            "go" => Ok(Ecosystem::Go),
            "maven" => Ok(Ecosystem::Maven),
            "cargo" => Ok(Ecosystem::Cargo),
            "rubygems" => Ok(Ecosystem::Rubygems),
            "nuget" => Ok(Ecosystem::Nuget),
            "composer" => Ok(Ecosystem::Composer),
            _ => Err(format!(
                "Unknown ecosystem: {}. Expected one of npm, pypi, go, maven, cargo, rubygems, nuget, composer",
                s
            )),
        }
    }
}

/// One package release: ecosystem + optional namespace + name + version.
///
/// Immutable once constructed; all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageCoordinate {
    ecosystem: Ecosystem,
    namespace: Option<String>,
    name: String,
    version: String,
}

impl PackageCoordinate {
    pub fn new(
        ecosystem: Ecosystem,
        namespace: Option<String>,
        name: String,
        version: String,
    ) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }
        let namespace = namespace.filter(|ns| !ns.is_empty());
        Ok(Self {
            ecosystem,
            namespace,
            name,
            version,
        })
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The identity key the listing backend and vulnerability maps use.
    ///
    /// Maven joins namespace and name with `:`, every other ecosystem with
    /// `/`; a coordinate without a namespace is just the name.
    pub fn key(&self) -> String {
        format_package_key(self.ecosystem, self.namespace.as_deref(), &self.name)
    }

    /// Graph node id: `key@version`.
    pub fn node_id(&self) -> String {
        format!("{}@{}", self.key(), self.version)
    }
}

/// Formats a package key from its parts (see [`PackageCoordinate::key`]).
pub fn format_package_key(ecosystem: Ecosystem, namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => match ecosystem {
            Ecosystem::Maven => format!("{}:{}", ns, name),
            _ => format!("{}/{}", ns, name),
        },
        _ => name.to_string(),
    }
}

/// Splits a package key back into (namespace, name).
///
/// Mirrors the formatting rules plus the scoped/path conventions the
/// ecosystems actually use: a leading `@` is an npm scope, a `:` is a
/// maven group separator, and a key with more than one `/` is a Go module
/// path whose first segment is the host namespace.
pub fn split_package_key(key: &str) -> (Option<&str>, &str) {
    if key.starts_with('@') {
        if let Some(i) = key.find('/') {
            if i > 0 {
                return (Some(&key[..i]), &key[i + 1..]);
            }
        }
    }
    if let Some(i) = key.find(':') {
        return (Some(&key[..i]), &key[i + 1..]);
    }
    if key.matches('/').count() > 1 {
        if let Some(i) = key.find('/') {
            return (Some(&key[..i]), &key[i + 1..]);
        }
    }
    (None, key)
}
