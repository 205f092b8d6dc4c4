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

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::requests::release::{ReleaseSettings, UpgradeReleaseSettings};
use crate::responses::namespace::NamespaceResponse;
use crate::responses::package::{PackageDetailResponse, PackageResponse};
use crate::responses::release::{ReleaseDetailResponse, ReleaseResponse, ReleaseStatusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::package::list,
        handlers::package::detail,
        handlers::package::values,
        //
        handlers::release::list,
        handlers::release::install,
        handlers::release::detail,
        handlers::release::upgrade,
        handlers::release::delete,
        handlers::release::status,
        //
        handlers::namespace::list,
        handlers::healthz::healthz,
    ),
    components(
        schemas(
            ReleaseSettings,
            UpgradeReleaseSettings,
            PackageResponse,
            PackageDetailResponse,
            ReleaseResponse,
            ReleaseDetailResponse,
            ReleaseStatusResponse,
            NamespaceResponse,
            handlers::healthz::HealthInfo,
        )
    ),
    tags(
        (name = "Packages", description = "Chart browsing and search"),
        (name = "Releases", description = "Release lifecycle"),
        (name = "Namespaces", description = "Deployment targets"),
        (name = "Health", description = "Liveness"),
    ),
)]
struct ApiDoc;

pub fn build() -> SwaggerUi {
    SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi())
}
