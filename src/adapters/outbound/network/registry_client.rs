use crate::ports::outbound::VersionResolver;
use crate::risk_graph::domain::Ecosystem;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Duration;

/// How many versions a suggestion list carries at most.
const MAX_SUGGESTED_VERSIONS: usize = 10;

/// Base URLs of the public registries, overridable through config.
#[derive(Debug, Clone)]
pub struct RegistryEndpoints {
    pub npm: String,
    pub pypi: String,
    pub go: String,
    pub maven: String,
    pub cargo: String,
    pub rubygems: String,
    pub nuget: String,
    pub composer: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            npm: "https://registry.npmjs.org".to_string(),
            pypi: "https://pypi.org".to_string(),
            go: "https://proxy.golang.org".to_string(),
            maven: "https://repo1.maven.org/maven2".to_string(),
            cargo: "https://crates.io".to_string(),
            rubygems: "https://rubygems.org".to_string(),
            nuget: "https://api.nuget.org".to_string(),
            composer: "https://repo.packagist.org".to_string(),
        }
    }
}

/// RegistryVersionResolver adapter for per-ecosystem version lookups
///
/// Talks to each ecosystem's public registry directly: npm packument,
/// PyPI JSON API, the Go module proxy, Maven metadata XML, crates.io,
/// RubyGems, the NuGet flat container, and Packagist. Lookup failures are
/// soft - a registry that answers oddly yields "no version", never an
/// aborted exploration.
pub struct RegistryVersionResolver {
    client: reqwest::Client,
    endpoints: RegistryEndpoints,
    maven_latest: Regex,
    maven_release: Regex,
    maven_version: Regex,
}

impl RegistryVersionResolver {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(RegistryEndpoints::default())
    }

    pub fn with_endpoints(endpoints: RegistryEndpoints) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("deprisk/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoints,
            maven_latest: Regex::new(r"<latest>([^<]+)</latest>")?,
            maven_release: Regex::new(r"<release>([^<]+)</release>")?,
            maven_version: Regex::new(r"<version>([^<]+)</version>")?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(response.json().await.ok())
    }

    async fn get_text(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(response.text().await.ok())
    }

    fn joined_name(namespace: Option<&str>, name: &str) -> String {
        match namespace {
            Some(ns) if !ns.is_empty() => format!("{}/{}", ns, name),
            _ => name.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NpmLatest {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NpmPackument {
    #[serde(default)]
    versions: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
    #[serde(default)]
    releases: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoLatest {
    #[serde(rename = "Version", default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CargoResponse {
    #[serde(rename = "crate", default)]
    krate: Option<CargoCrate>,
    #[serde(default)]
    versions: Vec<CargoVersion>,
}

#[derive(Debug, Deserialize)]
struct CargoCrate {
    #[serde(default)]
    newest_version: Option<String>,
    #[serde(default)]
    max_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CargoVersion {
    num: String,
}

#[derive(Debug, Deserialize)]
struct RubyGemsLatest {
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NugetIndex {
    #[serde(default)]
    versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ComposerResponse {
    #[serde(default)]
    packages: BTreeMap<String, Vec<ComposerVersion>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ComposerVersion {
    #[serde(default)]
    version: Option<String>,
}

#[async_trait]
impl VersionResolver for RegistryVersionResolver {
    async fn resolve_latest(
        &self,
        ecosystem: Ecosystem,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<String>> {
        let base = &self.endpoints;
        match ecosystem {
            Ecosystem::Npm => {
                let pkg = Self::joined_name(namespace, name);
                let url = format!("{}/{}/latest", base.npm, pkg);
                Ok(self
                    .get_json::<NpmLatest>(&url)
                    .await?
                    .and_then(|data| data.version))
            }
            Ecosystem::Pypi => {
                let url = format!("{}/pypi/{}/json", base.pypi, name);
                Ok(self
                    .get_json::<PypiResponse>(&url)
                    .await?
                    .and_then(|data| data.info.version))
            }
            Ecosystem::Go => {
                let module = Self::joined_name(namespace, name);
                let url = format!("{}/{}/@latest", base.go, module);
                Ok(self
                    .get_json::<GoLatest>(&url)
                    .await?
                    .and_then(|data| data.version))
            }
            Ecosystem::Maven => {
                let Some(group) = namespace.filter(|ns| !ns.is_empty()) else {
                    return Ok(None);
                };
                let group_path = group.replace('.', "/");
                let url = format!(
                    "{}/{}/{}/maven-metadata.xml",
                    base.maven, group_path, name
                );
                let Some(text) = self.get_text(&url).await? else {
                    return Ok(None);
                };
                let found = self
                    .maven_latest
                    .captures(&text)
                    .or_else(|| self.maven_release.captures(&text))
                    .map(|caps| caps[1].to_string());
                Ok(found)
            }
            Ecosystem::Cargo => {
                let url = format!("{}/api/v1/crates/{}", base.cargo, name);
                Ok(self
                    .get_json::<CargoResponse>(&url)
                    .await?
                    .and_then(|data| data.krate)
                    .and_then(|k| k.newest_version.or(k.max_version)))
            }
            Ecosystem::Rubygems => {
                let url = format!("{}/api/v1/versions/{}/latest.json", base.rubygems, name);
                Ok(self
                    .get_json::<RubyGemsLatest>(&url)
                    .await?
                    .and_then(|data| data.version))
            }
            Ecosystem::Nuget => {
                let url = format!(
                    "{}/v3-flatcontainer/{}/index.json",
                    base.nuget,
                    name.to_lowercase()
                );
                Ok(self
                    .get_json::<NugetIndex>(&url)
                    .await?
                    .and_then(|data| data.versions.last().cloned()))
            }
            Ecosystem::Composer => {
                let Some(ns) = namespace.filter(|ns| !ns.is_empty()) else {
                    return Ok(None);
                };
                let pkg = format!("{}/{}", ns, name);
                let url = format!("{}/p2/{}.json", base.composer, pkg);
                Ok(self
                    .get_json::<ComposerResponse>(&url)
                    .await?
                    .and_then(|data| data.packages.get(&pkg).cloned())
                    .and_then(|list| list.into_iter().next())
                    .and_then(|entry| entry.version))
            }
        }
    }

    async fn list_versions(
        &self,
        ecosystem: Ecosystem,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Vec<String>> {
        let base = &self.endpoints;
        let mut versions = match ecosystem {
            Ecosystem::Npm => {
                let pkg = Self::joined_name(namespace, name);
                let url = format!("{}/{}", base.npm, pkg);
                self.get_json::<NpmPackument>(&url)
                    .await?
                    .map(|data| data.versions.into_keys().collect())
                    .unwrap_or_default()
            }
            Ecosystem::Pypi => {
                let url = format!("{}/pypi/{}/json", base.pypi, name);
                self.get_json::<PypiResponse>(&url)
                    .await?
                    .map(|data| data.releases.into_keys().collect())
                    .unwrap_or_default()
            }
            Ecosystem::Go => {
                let module = Self::joined_name(namespace, name);
                let url = format!("{}/{}/@v/list", base.go, module);
                self.get_text(&url)
                    .await?
                    .map(|text| {
                        text.lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default()
            }
            Ecosystem::Maven => {
                let Some(group) = namespace.filter(|ns| !ns.is_empty()) else {
                    return Ok(Vec::new());
                };
                let group_path = group.replace('.', "/");
                let url = format!(
                    "{}/{}/{}/maven-metadata.xml",
                    base.maven, group_path, name
                );
                self.get_text(&url)
                    .await?
                    .map(|text| {
                        self.maven_version
                            .captures_iter(&text)
                            .map(|caps| caps[1].to_string())
                            .collect()
                    })
                    .unwrap_or_default()
            }
            Ecosystem::Cargo => {
                let url = format!("{}/api/v1/crates/{}", base.cargo, name);
                self.get_json::<CargoResponse>(&url)
                    .await?
                    .map(|data| data.versions.into_iter().map(|v| v.num).collect())
                    .unwrap_or_default()
            }
            // No listing endpoint worth suggesting from.
            _ => Vec::new(),
        };

        versions.sort_by(|a, b| natural_cmp(b, a));
        versions.truncate(MAX_SUGGESTED_VERSIONS);
        Ok(versions)
    }
}

/// Numeric-aware ordering: digit runs compare as numbers, everything else
/// compares case-insensitively, so "1.10.0" sorts above "1.9.2".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => {
                if lc.is_ascii_digit() && rc.is_ascii_digit() {
                    let lnum = take_digits(&mut left);
                    let rnum = take_digits(&mut right);
                    let cmp = compare_digit_runs(&lnum, &rnum);
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                } else {
                    let cmp = lc
                        .to_ascii_lowercase()
                        .cmp(&rc.to_ascii_lowercase())
                        .then_with(|| lc.cmp(&rc));
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                    left.next();
                    right.next();
                }
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            run.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    run
}

/// Compares digit runs without parsing, so arbitrarily long runs work:
/// strip leading zeros, shorter run is smaller, then lexicographic.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_creation() {
        let resolver = RegistryVersionResolver::new();
        assert!(resolver.is_ok());
    }

    #[test]
    fn test_natural_cmp_numeric_runs() {
        assert_eq!(natural_cmp("1.10.0", "1.9.2"), Ordering::Greater);
        assert_eq!(natural_cmp("2.0.0", "10.0.0"), Ordering::Less);
        assert_eq!(natural_cmp("1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_leading_zeros() {
        assert_eq!(natural_cmp("1.02.0", "1.2.0"), Ordering::Equal);
    }

    #[test]
    fn test_natural_cmp_mixed_text() {
        assert_eq!(natural_cmp("1.0.0-beta.2", "1.0.0-beta.10"), Ordering::Less);
    }

    #[test]
    fn test_sorted_desc_matches_expectations() {
        let mut versions = vec![
            "1.9.2".to_string(),
            "1.10.0".to_string(),
            "0.9.0".to_string(),
            "1.2.3".to_string(),
        ];
        versions.sort_by(|a, b| natural_cmp(b, a));
        assert_eq!(versions, vec!["1.10.0", "1.9.2", "1.2.3", "0.9.0"]);
    }

    #[test]
    fn test_joined_name() {
        assert_eq!(
            RegistryVersionResolver::joined_name(Some("@babel"), "core"),
            "@babel/core"
        );
        assert_eq!(RegistryVersionResolver::joined_name(None, "lodash"), "lodash");
    }

    #[test]
    fn test_npm_latest_deserialize() {
        let data: NpmLatest = serde_json::from_str(r#"{"version": "4.17.21"}"#).unwrap();
        assert_eq!(data.version.as_deref(), Some("4.17.21"));
    }

    #[test]
    fn test_cargo_response_deserialize() {
        let data: CargoResponse = serde_json::from_str(
            r#"{"crate": {"newest_version": "1.0.200"}, "versions": [{"num": "1.0.200"}, {"num": "1.0.199"}]}"#,
        )
        .unwrap();
        assert_eq!(
            data.krate.and_then(|k| k.newest_version).as_deref(),
            Some("1.0.200")
        );
        assert_eq!(data.versions.len(), 2);
    }

    #[test]
    fn test_composer_response_deserialize() {
        let data: ComposerResponse = serde_json::from_str(
            r#"{"packages": {"monolog/monolog": [{"version": "3.5.0"}]}}"#,
        )
        .unwrap();
        let list = data.packages.get("monolog/monolog").unwrap();
        assert_eq!(list[0].version.as_deref(), Some("3.5.0"));
    }

    // Integration tests - require network access
    // Uncomment to run against the live registries
    // #[tokio::test]
    // async fn test_resolve_latest_npm_real() {
    //     let resolver = RegistryVersionResolver::new().unwrap();
    //     let version = resolver
    //         .resolve_latest(Ecosystem::Npm, None, "lodash")
    //         .await
    //         .unwrap();
    //     assert!(version.is_some());
    // }
}
