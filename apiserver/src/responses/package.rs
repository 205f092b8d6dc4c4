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

use appstore_helm::SearchResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A package with all its available versions, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PackageResponse {
    /// The chart name.
    pub name: String,
    /// The repository the newest version lives in.
    pub repo: String,
    /// The newest available version.
    pub version: String,
    pub app_version: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub available_versions: Vec<String>,
}

impl PackageResponse {
    /// Builds the response from one name group, as produced by
    /// `group_by_name` (newest version first).
    pub fn from_group(group: &[SearchResult]) -> Option<Self> {
        let newest = group.first()?;
        Some(Self {
            name: newest.chart.name.clone(),
            repo: repo_of(newest),
            version: newest.chart.version.clone(),
            app_version: newest.chart.app_version.clone(),
            description: newest.chart.description.clone(),
            icon: newest.chart.icon.clone(),
            available_versions: group.iter().map(|r| r.chart.version.clone()).collect(),
        })
    }
}

/// Full detail of a single chart version.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PackageDetailResponse {
    pub name: String,
    pub repo: String,
    pub version: String,
    pub app_version: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub home: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    pub created: Option<String>,
    pub digest: Option<String>,
    pub available_versions: Vec<String>,
}

impl PackageDetailResponse {
    pub fn new(repo: &str, chart: appstore_helm::ChartVersion, available_versions: Vec<String>) -> Self {
        Self {
            name: chart.name,
            repo: repo.to_string(),
            version: chart.version,
            app_version: chart.app_version,
            description: chart.description,
            keywords: chart.keywords,
            home: chart.home,
            icon: chart.icon,
            sources: chart.sources,
            urls: chart.urls,
            created: chart.created,
            digest: chart.digest,
            available_versions,
        }
    }
}

fn repo_of(result: &SearchResult) -> String {
    result.name.split_once('/').map(|(repo, _)| repo.to_string()).unwrap_or_default()
}
