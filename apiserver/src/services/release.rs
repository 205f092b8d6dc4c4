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

use appstore_common::values::{self, ValuesMap};
use appstore_dataporten::schema::{client_id_from_values, ClientSettings, RegisterClientResult};
use appstore_dataporten::APPSTORE_SETTINGS_KEY;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::context::Context;
use crate::errors::ApiError;
use crate::requests::release::{ReleaseSettings, UpgradeReleaseSettings};
use crate::responses::release::{ReleaseDetailResponse, ReleaseResponse, ReleaseStatusResponse};
use crate::services::Result;

/// Key under which the source repository is stamped into release values, so
/// detail and upgrade can recover where the chart came from.
const METADATA_KEY: &str = "appstore_meta_data";

pub struct ReleaseService;

impl ReleaseService {
    /// The release overview across all namespaces.
    pub async fn list(ctx: &Context) -> Result<Vec<ReleaseResponse>> {
        let releases = ctx.helm.list().await?;
        Ok(releases.into_iter().map(ReleaseResponse::from).collect())
    }

    /// Installs a chart, registering an OAuth client with the identity
    /// provider first when the chart values ask for one.
    ///
    /// The two phases are not atomic: when the install fails after a
    /// successful registration, the client is deleted again best-effort and
    /// the install error is returned.
    pub async fn install(
        ctx: &Context,
        token: Option<&str>,
        mut settings: ReleaseSettings,
    ) -> Result<ReleaseDetailResponse> {
        let chart = ctx.index.resolve(&settings.repo, &settings.package, settings.version.as_deref())?;

        let mut registered: Option<RegisterClientResult> = None;
        if let Some(client_settings) = ClientSettings::from_values(&settings.values)? {
            let token = token.ok_or(ApiError::MissingToken)?;
            let result = ctx.dataporten.register_client(&client_settings, token).await?;
            debug!(client_id = %result.client_id, "registered dataporten client");
            registered = Some(result);
        }

        let mut extra = ValuesMap::new();
        if let Some(result) = &registered {
            let details = serde_json::to_value(result)
                .map_err(|err| ApiError::Internal(err.to_string()))?;
            extra.insert(APPSTORE_SETTINGS_KEY.to_string(), details);
        }
        extra.insert(METADATA_KEY.to_string(), json!({ "repo": settings.repo }));
        values::merge(&mut settings.values, extra);

        let chart_ref = format!("{}/{}", settings.repo, settings.package);
        let installed = ctx
            .helm
            .install(&chart_ref, Some(&chart.version), &settings.namespace, &settings.values)
            .await;

        match installed {
            Ok(release) => {
                settings.version = Some(chart.version);
                Ok(ReleaseDetailResponse {
                    id: release.name,
                    namespace: release.namespace,
                    settings,
                })
            }
            Err(err) => {
                // Compensate: the chart never made it, so the freshly
                // registered client must go again. Best effort only.
                if let (Some(result), Some(token)) = (&registered, token) {
                    if let Err(cleanup) = ctx.dataporten.delete_client(&result.client_id, token).await {
                        warn!(client_id = %result.client_id, error = %cleanup,
                            "failed to roll back dataporten client after install failure");
                    }
                }
                Err(err.into())
            }
        }
    }

    /// The install-time view of a deployed release: the settings it was
    /// deployed with, values included.
    pub async fn detail(ctx: &Context, name: &str) -> Result<ReleaseDetailResponse> {
        let element = ctx.helm.find_release(name).await?;
        let values = ctx.helm.get_values(name, &element.namespace).await?;

        let repo = values
            .get(METADATA_KEY)
            .and_then(Value::as_object)
            .and_then(|md| md.get("repo"))
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Internal("failed to get appstore package metadata".to_string()))?
            .to_string();

        Ok(ReleaseDetailResponse {
            id: element.name.clone(),
            namespace: element.namespace.clone(),
            settings: ReleaseSettings {
                repo,
                package: element.chart_name().to_string(),
                version: Some(element.chart_version().to_string()),
                namespace: element.namespace,
                admin_groups: Vec::new(),
                values,
            },
        })
    }

    /// Status of a deployed release, with the resource listing parsed into
    /// a map.
    pub async fn status(ctx: &Context, name: &str) -> Result<ReleaseStatusResponse> {
        let element = ctx.helm.find_release(name).await?;
        let status = ctx.helm.status(name, &element.namespace).await?;

        let resources =
            appstore_helm::resources::parse_resources(status.info.resources.as_deref().unwrap_or_default());

        Ok(ReleaseStatusResponse {
            last_deployed: status.info.last_deployed,
            namespace: status.namespace,
            status: status.info.status,
            resources,
        })
    }

    /// Upgrades (or downgrades) a release to the requested version, using
    /// the same repo and package it was deployed with.
    pub async fn upgrade(
        ctx: &Context,
        name: &str,
        upgrade: UpgradeReleaseSettings,
    ) -> Result<ReleaseResponse> {
        let detail = Self::detail(ctx, name).await?;

        let chart =
            ctx.index.resolve(&detail.settings.repo, &detail.settings.package, Some(&upgrade.version))?;
        let chart_ref = format!("{}/{}", detail.settings.repo, detail.settings.package);

        let release = ctx.helm.upgrade(name, &chart_ref, &chart.version, &detail.namespace).await?;
        Ok(ReleaseResponse::from(release))
    }

    /// Deletes a release, then best-effort deletes any OAuth client that
    /// was registered alongside it.
    pub async fn delete(ctx: &Context, token: Option<&str>, name: &str) -> Result<()> {
        let element = ctx.helm.find_release(name).await?;
        // read the values before the release (and with it the registration
        // record) disappears
        let values = ctx.helm.get_values(name, &element.namespace).await?;

        ctx.helm.uninstall(name, &element.namespace).await?;
        debug!(release = %name, "deleted release");

        if let Some(client_id) = client_id_from_values(&values) {
            match token {
                Some(token) => {
                    if let Err(err) = ctx.dataporten.delete_client(&client_id, token).await {
                        warn!(%client_id, error = %err, "failed to delete dataporten client");
                    }
                }
                None => warn!(%client_id, "no token provided, leaving dataporten client behind"),
            }
        }

        Ok(())
    }
}
