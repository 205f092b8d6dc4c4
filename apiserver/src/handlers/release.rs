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

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::context::Context;
use crate::errors::ApiError;
use crate::extractors::MaybeToken;
use crate::requests::release::{ReleaseSettings, UpgradeReleaseSettings};
use crate::services::release::ReleaseService;

// The Releases Service Handlers.

/// Lists the deployed releases.
#[utoipa::path(
    get, path = "/api/v1/releases",
    responses(
        (status = 200, description = "List all releases successfully", body = [ReleaseResponse]),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn list(State(ctx): State<Arc<Context>>) -> Result<impl IntoResponse, ApiError> {
    let releases = ReleaseService::list(&ctx).await?;
    Ok(Json(releases))
}

/// Installs a chart, optionally provisioning an OAuth client alongside it.
#[utoipa::path(
    post, path = "/api/v1/releases",
    request_body(
        content = ReleaseSettings,
        description = "Install release request",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Release installed successfully", body = ReleaseDetailResponse),
        (status = 400, description = "Invalid request or missing token"),
        (status = 404, description = "Package not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn install(
    State(ctx): State<Arc<Context>>,
    token: MaybeToken,
    Json(settings): Json<ReleaseSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let release = ReleaseService::install(&ctx, token.0.as_deref(), settings).await?;
    Ok(Json(release))
}

/// Returns the install-time view of a release.
#[utoipa::path(
    get, path = "/api/v1/releases/{name}",
    params(("name" = String, Path, description = "The release name")),
    responses(
        (status = 200, description = "Release found successfully", body = ReleaseDetailResponse),
        (status = 404, description = "Release not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn detail(
    Path(name): Path<String>,
    State(ctx): State<Arc<Context>>,
) -> Result<impl IntoResponse, ApiError> {
    let release = ReleaseService::detail(&ctx, &name).await?;
    Ok(Json(release))
}

/// Upgrades a release to the requested version.
#[utoipa::path(
    patch, path = "/api/v1/releases/{name}",
    params(("name" = String, Path, description = "The release name")),
    request_body(
        content = UpgradeReleaseSettings,
        description = "Upgrade release request",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Release upgraded successfully", body = ReleaseResponse),
        (status = 404, description = "Release or chart version not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn upgrade(
    Path(name): Path<String>,
    State(ctx): State<Arc<Context>>,
    Json(settings): Json<UpgradeReleaseSettings>,
) -> Result<impl IntoResponse, ApiError> {
    let release = ReleaseService::upgrade(&ctx, &name, settings).await?;
    Ok(Json(release))
}

/// Deletes a release and, best effort, its OAuth client.
#[utoipa::path(
    delete, path = "/api/v1/releases/{name}",
    params(("name" = String, Path, description = "The release name")),
    responses(
        (status = 204, description = "Release deleted successfully"),
        (status = 404, description = "Release not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn delete(
    Path(name): Path<String>,
    State(ctx): State<Arc<Context>>,
    token: MaybeToken,
) -> Result<impl IntoResponse, ApiError> {
    ReleaseService::delete(&ctx, token.0.as_deref(), &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns status information for a release.
#[utoipa::path(
    get, path = "/api/v1/releases/{name}/status",
    params(("name" = String, Path, description = "The release name")),
    responses(
        (status = 200, description = "Release status found successfully", body = ReleaseStatusResponse),
        (status = 404, description = "Release not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Releases"
)]
pub async fn status(
    Path(name): Path<String>,
    State(ctx): State<Arc<Context>>,
) -> Result<impl IntoResponse, ApiError> {
    let status = ReleaseService::status(&ctx, &name).await?;
    Ok(Json(status))
}
