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

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::context::Context;
use crate::errors::ApiError;
use crate::requests::package::{ListPackagesQuery, PackageRefQuery};
use crate::services::package::PackageService;

// The Packages Service Handlers.

/// Lists all packages with their available versions, or searches them.
#[utoipa::path(
    get, path = "/api/v1/packages",
    params(ListPackagesQuery),
    responses(
        (status = 200, description = "List all packages successfully", body = [PackageResponse]),
        (status = 400, description = "Invalid version constraint"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Packages"
)]
pub async fn list(
    State(ctx): State<Arc<Context>>,
    Query(params): Query<ListPackagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let packages = PackageService::list(
        &ctx,
        params.query.as_deref(),
        params.repo.as_deref(),
        params.version.as_deref(),
    )?;
    Ok(Json(packages))
}

/// Returns a package detail.
#[utoipa::path(
    get, path = "/api/v1/packages/{name}",
    params(
        ("name" = String, Path, description = "The chart name"),
        PackageRefQuery,
    ),
    responses(
        (status = 200, description = "Package found successfully", body = PackageDetailResponse),
        (status = 404, description = "Package not found"),
    ),
    tag = "Packages"
)]
pub async fn detail(
    Path(name): Path<String>,
    Query(params): Query<PackageRefQuery>,
    State(ctx): State<Arc<Context>>,
) -> Result<impl IntoResponse, ApiError> {
    let package =
        PackageService::detail(&ctx, &name, params.repo.as_deref(), params.version.as_deref())?;
    Ok(Json(package))
}

/// Returns a chart's default values.
#[utoipa::path(
    get, path = "/api/v1/packages/{name}/values",
    params(
        ("name" = String, Path, description = "The chart name"),
        PackageRefQuery,
    ),
    responses(
        (status = 200, description = "Chart values found successfully"),
        (status = 404, description = "Package not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Packages"
)]
pub async fn values(
    Path(name): Path<String>,
    Query(params): Query<PackageRefQuery>,
    State(ctx): State<Arc<Context>>,
) -> Result<impl IntoResponse, ApiError> {
    let values = PackageService::default_values(
        &ctx,
        &name,
        params.repo.as_deref(),
        params.version.as_deref(),
        params.key.as_deref(),
    )
    .await?;
    Ok(Json(values))
}
