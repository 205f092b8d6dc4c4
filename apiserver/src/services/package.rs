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
use appstore_helm::index::{apply_constraint, filter_by_repo, group_by_name};
use serde_json::Value;

use crate::context::Context;
use crate::errors::ApiError;
use crate::responses::package::{PackageDetailResponse, PackageResponse};
use crate::services::Result;

const DEFAULT_REPO: &str = "stable";

pub struct PackageService;

impl PackageService {
    /// Lists packages grouped by name, optionally narrowed by a text query,
    /// a repository and a semver requirement.
    pub fn list(
        ctx: &Context,
        query: Option<&str>,
        repo: Option<&str>,
        version: Option<&str>,
    ) -> Result<Vec<PackageResponse>> {
        let results = match query {
            Some(query) if !query.is_empty() => ctx.index.search(query),
            _ => ctx.index.all(),
        };
        let results = filter_by_repo(results, repo.unwrap_or_default());
        let results = apply_constraint(results, version.unwrap_or_default())?;

        Ok(group_by_name(results).iter().filter_map(|group| PackageResponse::from_group(group)).collect())
    }

    /// Full detail of one chart, the newest version unless pinned.
    pub fn detail(
        ctx: &Context,
        package: &str,
        repo: Option<&str>,
        version: Option<&str>,
    ) -> Result<PackageDetailResponse> {
        let repo = effective_repo(repo);
        let chart = ctx.index.resolve(repo, package, version)?;

        let prefix = format!("{repo}/");
        let available_versions = ctx
            .index
            .single_package(package)?
            .into_iter()
            .filter(|r| r.name.starts_with(&prefix))
            .map(|r| r.chart.version)
            .collect();

        Ok(PackageDetailResponse::new(repo, chart, available_versions))
    }

    /// The chart's default values, optionally narrowed to one top-level
    /// section. The values come from the chart archive itself, so this is
    /// the one package operation delegated to the package manager.
    pub async fn default_values(
        ctx: &Context,
        package: &str,
        repo: Option<&str>,
        version: Option<&str>,
        key: Option<&str>,
    ) -> Result<ValuesMap> {
        let repo = effective_repo(repo);
        let chart = ctx.index.resolve(repo, package, version)?;

        let raw = ctx.helm.show_values(&format!("{repo}/{package}"), Some(&chart.version)).await?;
        let values: Value = serde_yaml::from_str(&raw)
            .map_err(|err| ApiError::Internal(format!("chart values are not valid yaml: {err}")))?;

        let section = match key {
            Some(key) => values.get(key).cloned().unwrap_or(Value::Null),
            None => values,
        };

        match section {
            Value::Object(map) => Ok(map),
            _ => Ok(ValuesMap::new()),
        }
    }
}

fn effective_repo(repo: Option<&str>) -> &str {
    match repo {
        Some(repo) if !repo.is_empty() => repo,
        _ => DEFAULT_REPO,
    }
}
