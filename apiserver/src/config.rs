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

use std::path::PathBuf;

/// The configuration parameters for the application.
///
/// These can either be passed on the command line, or pulled from environment
/// variables. The latter is preferred as environment variables are one of the
/// recommended ways to get configuration from Kubernetes Secrets in
/// deployment.
///
/// For development convenience, these can also be read from a `.env` file in
/// the working directory where the application is started.
#[derive(clap::Parser, Debug, Clone)]
pub struct Config {
    /// The server port.
    #[arg(long, env = "APPSTORE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// The package-manager binary driven for installs, upgrades and deletes.
    #[arg(long, env = "APPSTORE_HELM_BIN", default_value = "helm")]
    pub helm_bin: String,

    /// The chart repository configuration file (`repositories.yaml`).
    #[arg(long, env = "APPSTORE_REPOSITORY_CONFIG")]
    pub repository_config: PathBuf,

    /// The directory holding the cached `<repo>-index.yaml` files.
    #[arg(long, env = "APPSTORE_REPOSITORY_CACHE")]
    pub repository_cache: PathBuf,

    /// The static namespace/subject mapping file.
    #[arg(long, env = "APPSTORE_NAMESPACE_MAPPINGS", default_value = "subjects.yml")]
    pub namespace_mappings: PathBuf,

    /// Glob the dashboard templates are compiled from.
    #[arg(long, env = "APPSTORE_TEMPLATES", default_value = "templates/**/*.html")]
    pub templates: String,

    /// The directory served under `/static`.
    #[arg(long, env = "APPSTORE_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// The identity provider's client administration endpoint.
    #[arg(
        long,
        env = "APPSTORE_DATAPORTEN_CLIENTS_URL",
        default_value = "https://clientadmin.dataporten-api.no/clients/"
    )]
    pub dataporten_clients_url: String,

    /// The identity provider's group membership endpoint.
    #[arg(
        long,
        env = "APPSTORE_DATAPORTEN_GROUPS_URL",
        default_value = "https://groups-api.dataporten.no/groups/me/groups"
    )]
    pub dataporten_groups_url: String,
}
