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

use appstore_helm::client::{InstalledRelease, ReleaseElement};
use appstore_helm::resources::ResourceTable;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::requests::release::ReleaseSettings;

/// One row of the release overview.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReleaseResponse {
    /// The release name.
    pub id: String,
    pub namespace: String,
    pub revision: String,
    pub status: String,
    /// The deployed chart as `name-version`.
    pub chart: String,
    pub app_version: String,
    pub updated: String,
}

impl From<ReleaseElement> for ReleaseResponse {
    fn from(element: ReleaseElement) -> Self {
        Self {
            id: element.name,
            namespace: element.namespace,
            revision: element.revision,
            status: element.status,
            chart: element.chart,
            app_version: element.app_version,
            updated: element.updated,
        }
    }
}

impl From<InstalledRelease> for ReleaseResponse {
    fn from(release: InstalledRelease) -> Self {
        Self {
            id: release.name,
            namespace: release.namespace,
            revision: release.version.to_string(),
            status: release.info.status,
            chart: format!("{}-{}", release.chart.metadata.name, release.chart.metadata.version),
            app_version: release.chart.metadata.app_version.unwrap_or_default(),
            updated: release.info.last_deployed.unwrap_or_default(),
        }
    }
}

/// The install-time view of a release: the same settings the user posted,
/// enriched with what the deployment actually resolved to.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReleaseDetailResponse {
    /// The release name.
    pub id: String,
    pub namespace: String,
    #[serde(flatten)]
    pub settings: ReleaseSettings,
}

/// Status of a deployed release.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReleaseStatusResponse {
    pub last_deployed: Option<String>,
    pub namespace: String,
    pub status: String,
    /// Parsed resource listing, keyed by resource kind section.
    #[schema(value_type = Object)]
    pub resources: ResourceTable,
}
