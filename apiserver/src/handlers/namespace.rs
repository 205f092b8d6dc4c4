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

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::context::Context;
use crate::errors::ApiError;
use crate::extractors::MaybeToken;
use crate::services::namespace::NamespaceService;

// The Namespaces Service Handlers.

/// Lists the namespaces the calling user may deploy into, determined from
/// their identity-provider group memberships.
#[utoipa::path(
    get, path = "/api/v1/namespaces",
    responses(
        (status = 200, description = "List allowed namespaces successfully", body = [NamespaceResponse]),
        (status = 400, description = "Missing X-Dataporten-Token"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Namespaces"
)]
pub async fn list(
    State(ctx): State<Arc<Context>>,
    token: MaybeToken,
) -> Result<impl IntoResponse, ApiError> {
    let namespaces = NamespaceService::allowed(&ctx, token.require()?).await?;
    Ok(Json(namespaces))
}
