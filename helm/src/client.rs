// Copyright (c) The Appstore Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::debug;

use crate::errors::{HelmError, Result};

/// How many releases a single overview listing may return.
const LIST_MAX: &str = "256";

/// One row of `helm list -o json`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReleaseElement {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub chart: String,
    #[serde(default)]
    pub app_version: String,
}

impl ReleaseElement {
    /// The chart name, split off the `name-version` chart field.
    pub fn chart_name(&self) -> &str {
        self.chart.rsplit_once('-').map(|(name, _)| name).unwrap_or(&self.chart)
    }

    /// The chart version, split off the `name-version` chart field.
    pub fn chart_version(&self) -> &str {
        self.chart.rsplit_once('-').map(|(_, version)| version).unwrap_or_default()
    }
}

/// The lifecycle section of a release, as reported by the package manager.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_deployed: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Human-readable resource listing, present on Tiller-era status
    /// output; parse with [`crate::resources::parse_resources`].
    #[serde(default)]
    pub resources: Option<String>,
}

/// `helm status -o json`.
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseStatus {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub info: ReleaseInfo,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ChartMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "appVersion", default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ChartInfo {
    #[serde(default)]
    pub metadata: ChartMetadata,
}

/// `helm install` / `helm upgrade` JSON output.
#[derive(Deserialize, Debug, Clone)]
pub struct InstalledRelease {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub info: ReleaseInfo,
    #[serde(default)]
    pub chart: ChartInfo,
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
}

/// Command-driven client for the external package manager.
///
/// All chart resolution, templating and release reconciliation stays inside
/// the `helm` binary; this client only shells out and reshapes the output.
#[derive(Debug, Clone)]
pub struct HelmClient {
    bin: String,
}

impl HelmClient {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        let command = format!("{} {}", self.bin, args.join(" "));
        debug!(%command, "running helm");

        let output = Command::new(&self.bin)
            .args(&args)
            .output()
            .await
            .map_err(|source| HelmError::CommandSpawnError { command: command.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HelmError::CommandFailed { command, stderr });
        }

        Ok(output.stdout)
    }

    /// Maps a failed per-release command onto `ReleaseNotFound` when the
    /// package manager reports the release as missing.
    fn release_scoped(result: Result<Vec<u8>>, release: &str) -> Result<Vec<u8>> {
        match result {
            Err(HelmError::CommandFailed { stderr, .. }) if stderr.contains("not found") => {
                Err(HelmError::ReleaseNotFound(release.to_string()))
            }
            other => other,
        }
    }

    /// `helm version --short`, used as a startup availability probe.
    pub async fn version(&self) -> Result<String> {
        let out = self.run(str_args(&["version", "--short"])).await?;
        Ok(String::from_utf8(out).map_err(HelmError::InvalidUtf8Output)?.trim().to_string())
    }

    /// Lists releases across all namespaces, every status included.
    pub async fn list(&self) -> Result<Vec<ReleaseElement>> {
        let args = str_args(&["list", "--all-namespaces", "--all", "--max", LIST_MAX, "-o", "json"]);
        let out = self.run(args).await?;
        serde_json::from_slice(&out).map_err(HelmError::JsonOutputError)
    }

    /// Finds a single release by name, across namespaces.
    pub async fn find_release(&self, name: &str) -> Result<ReleaseElement> {
        self.list()
            .await?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| HelmError::ReleaseNotFound(name.to_string()))
    }

    /// `helm status <name> -o json`.
    pub async fn status(&self, name: &str, namespace: &str) -> Result<ReleaseStatus> {
        let mut args = str_args(&["status", name]);
        push_namespace(&mut args, namespace);
        args.extend(str_args(&["-o", "json"]));

        let out = Self::release_scoped(self.run(args).await, name)?;
        serde_json::from_slice(&out).map_err(HelmError::JsonOutputError)
    }

    /// `helm get values <name> -o json`: the user-supplied values of a
    /// deployed release. A release installed without values yields `null`,
    /// which comes back as an empty map.
    pub async fn get_values(&self, name: &str, namespace: &str) -> Result<Map<String, Value>> {
        let mut args = str_args(&["get", "values", name]);
        push_namespace(&mut args, namespace);
        args.extend(str_args(&["-o", "json"]));

        let out = Self::release_scoped(self.run(args).await, name)?;
        let value: Value = serde_json::from_slice(&out).map_err(HelmError::JsonOutputError)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Installs a chart with a generated release name.
    ///
    /// The values map is written to a temporary YAML file handed to the
    /// package manager; the file lives until the command has finished.
    pub async fn install(
        &self,
        chart_ref: &str,
        version: Option<&str>,
        namespace: &str,
        values: &Map<String, Value>,
    ) -> Result<InstalledRelease> {
        let values_file = write_values(values)?;

        let mut args = str_args(&["install", "--generate-name", chart_ref]);
        if let Some(version) = version {
            if !version.is_empty() {
                args.extend(str_args(&["--version", version]));
            }
        }
        if !namespace.is_empty() {
            args.extend(str_args(&["--namespace", namespace, "--create-namespace"]));
        }
        args.push("--values".into());
        args.push(values_file.path().display().to_string());
        args.extend(str_args(&["-o", "json"]));

        let out = self.run(args).await?;
        serde_json::from_slice(&out).map_err(HelmError::JsonOutputError)
    }

    /// Upgrades (or downgrades) a release to an explicit chart version,
    /// reusing the values it was deployed with.
    pub async fn upgrade(
        &self,
        name: &str,
        chart_ref: &str,
        version: &str,
        namespace: &str,
    ) -> Result<InstalledRelease> {
        let mut args = str_args(&["upgrade", name, chart_ref, "--version", version, "--reuse-values"]);
        push_namespace(&mut args, namespace);
        args.extend(str_args(&["-o", "json"]));

        let out = Self::release_scoped(self.run(args).await, name)?;
        serde_json::from_slice(&out).map_err(HelmError::JsonOutputError)
    }

    /// `helm uninstall <name>`.
    pub async fn uninstall(&self, name: &str, namespace: &str) -> Result<()> {
        let mut args = str_args(&["uninstall", name]);
        push_namespace(&mut args, namespace);

        Self::release_scoped(self.run(args).await, name)?;
        Ok(())
    }

    /// `helm show values <chart>`: the chart's default values as raw YAML.
    pub async fn show_values(&self, chart_ref: &str, version: Option<&str>) -> Result<String> {
        let mut args = str_args(&["show", "values", chart_ref]);
        if let Some(version) = version {
            if !version.is_empty() {
                args.extend(str_args(&["--version", version]));
            }
        }

        let out = self.run(args).await?;
        String::from_utf8(out).map_err(HelmError::InvalidUtf8Output)
    }
}

fn str_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn push_namespace(args: &mut Vec<String>, namespace: &str) {
    if !namespace.is_empty() {
        args.push("--namespace".into());
        args.push(namespace.into());
    }
}

fn write_values(values: &Map<String, Value>) -> Result<tempfile::NamedTempFile> {
    let file = tempfile::NamedTempFile::new().map_err(HelmError::ValuesFileError)?;
    serde_yaml::to_writer(file.as_file(), &Value::Object(values.clone()))
        .map_err(HelmError::ValuesSerializationError)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_OUTPUT: &str = r#"[
        {"name":"excited-newt","namespace":"default","revision":"1","updated":"2020-05-12 11:20:13",
         "status":"deployed","chart":"mysql-1.6.9","app_version":"5.7.30"},
        {"name":"calm-seal","namespace":"web","revision":"3","updated":"2020-05-13 09:01:44",
         "status":"failed","chart":"cert-manager-0.12.0","app_version":"0.12.0"}
    ]"#;

    #[test]
    fn test_release_element_chart_split() {
        let releases: Vec<ReleaseElement> = serde_json::from_str(LIST_OUTPUT).unwrap();

        assert_eq!(releases[0].chart_name(), "mysql");
        assert_eq!(releases[0].chart_version(), "1.6.9");
        // chart names may themselves contain dashes
        assert_eq!(releases[1].chart_name(), "cert-manager");
        assert_eq!(releases[1].chart_version(), "0.12.0");
    }

    #[test]
    fn test_status_output_parses() {
        let raw = r#"{"name":"excited-newt","namespace":"default","version":1,
            "info":{"status":"deployed","last_deployed":"2020-05-12T11:20:13Z",
                    "resources":"==> v1/Service\nNAME  AGE\nexcited-newt-mysql  8h\n"}}"#;
        let status: ReleaseStatus = serde_json::from_str(raw).unwrap();

        assert_eq!(status.name, "excited-newt");
        assert_eq!(status.info.status, "deployed");
        assert!(status.info.resources.unwrap().starts_with("==> v1/Service"));
    }

    #[test]
    fn test_write_values_produces_yaml() {
        let values = serde_json::json!({"replicas": 2, "image": {"tag": "1.0"}});
        let file = write_values(values.as_object().unwrap()).unwrap();

        let raw = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Value = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(parsed["replicas"], 2);
        assert_eq!(parsed["image"]["tag"], "1.0");
    }

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let client = HelmClient::new("/nonexistent/helm");
        assert!(matches!(
            client.version().await,
            Err(HelmError::CommandSpawnError { .. })
        ));
    }
}
