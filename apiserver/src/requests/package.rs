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
use utoipa::IntoParams;

/// Query parameters of the package listing endpoint.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ListPackagesQuery {
    /// Free-text search over chart names, keywords and descriptions.
    pub query: Option<String>,
    /// Restrict results to a single repository.
    pub repo: Option<String>,
    /// Semver requirement the chart version must satisfy, e.g. `^1.6`.
    pub version: Option<String>,
}

/// Query parameters of the package detail and default-values endpoints.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct PackageRefQuery {
    /// Chart version; the newest one when omitted.
    pub version: Option<String>,
    /// Repository the chart lives in, `stable` when omitted.
    pub repo: Option<String>,
    /// Restrict the returned default values to one top-level section,
    /// e.g. `persistence`.
    pub key: Option<String>,
}
