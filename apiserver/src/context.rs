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

use std::time::Instant;

use appstore_dataporten::DataportenClient;
use appstore_helm::{HelmClient, SearchIndex};
use tracing::{info, warn};

use crate::config::Config;

/// The core type through which handler functions can access common API
/// state: the package-manager client, the chart index, the identity-provider
/// client and the compiled dashboard templates.
///
/// The chart index is built once here and shared read-only afterwards.
pub struct Context {
    pub config: Config,
    pub helm: HelmClient,
    pub index: SearchIndex,
    pub dataporten: DataportenClient,
    pub templates: tera::Tera,
    pub started_at: Instant,
}

impl Context {
    pub async fn new(config: Config) -> anyhow::Result<Context> {
        let helm = HelmClient::new(&config.helm_bin);
        match helm.version().await {
            Ok(version) => info!(%version, "package manager available"),
            Err(err) => warn!(error = %err, "package manager not reachable at startup"),
        }

        let index = SearchIndex::load(&config.repository_config, &config.repository_cache)?;
        info!(charts = index.all().len(), "chart index built");

        let dataporten =
            DataportenClient::new(&config.dataporten_clients_url, &config.dataporten_groups_url)?;
        let templates = tera::Tera::new(&config.templates)?;

        Ok(Context { config, helm, index, dataporten, templates, started_at: Instant::now() })
    }
}
