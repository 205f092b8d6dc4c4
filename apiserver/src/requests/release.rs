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

use appstore_common::values::ValuesMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_repo() -> String {
    "stable".to_string()
}

/// User-supplied install request: which chart to deploy, where, and with
/// which values. Exists only for the duration of the request.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReleaseSettings {
    /// Repository the chart is resolved from.
    #[serde(default = "default_repo")]
    pub repo: String,
    /// The chart to deploy.
    pub package: String,
    /// Chart version; the newest one when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Target namespace; the cluster default when empty.
    #[serde(default)]
    pub namespace: String,
    /// Groups granted admin access to the deployed application.
    #[serde(rename = "adminGroups", default, skip_serializing_if = "Vec::is_empty")]
    pub admin_groups: Vec<String>,
    /// Arbitrary chart values.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub values: ValuesMap,
}

/// Upgrade (or downgrade) request; repo and package are recovered from the
/// deployed release.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpgradeReleaseSettings {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_defaults_to_stable() {
        let settings: ReleaseSettings = serde_json::from_str(r#"{"package": "mysql"}"#).unwrap();
        assert_eq!(settings.repo, "stable");
        assert_eq!(settings.version, None);
        assert!(settings.values.is_empty());
    }

    #[test]
    fn test_admin_groups_wire_name() {
        let settings: ReleaseSettings =
            serde_json::from_str(r#"{"package": "mysql", "adminGroups": ["fc:org:example.org"]}"#)
                .unwrap();
        assert_eq!(settings.admin_groups, vec!["fc:org:example.org"]);
    }
}
