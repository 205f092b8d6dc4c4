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

use semver::Version;
use serde::{Deserialize, Serialize};

/// One versioned chart entry of a repository index file.
///
/// This mirrors the entries of Helm's `index.yaml`; unknown fields are
/// ignored so indexes produced by newer Helm versions still load.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartVersion {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub deprecated: Option<bool>,
}

impl ChartVersion {
    /// The chart version as semver, when it parses as one.
    pub fn semver(&self) -> Option<Version> {
        Version::parse(self.version.trim_start_matches('v')).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_parses_plain_and_prefixed() {
        let mut chart = ChartVersion { name: "mysql".into(), version: "1.6.9".into(), ..Default::default() };
        assert_eq!(chart.semver(), Some(Version::new(1, 6, 9)));

        chart.version = "v2.0.1".into();
        assert_eq!(chart.semver(), Some(Version::new(2, 0, 1)));

        chart.version = "latest".into();
        assert_eq!(chart.semver(), None);
    }
}
