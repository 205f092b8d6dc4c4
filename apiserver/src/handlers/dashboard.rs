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
use axum::response::{Html, IntoResponse, Response};
use chrono::Local;
use tracing::error;

use crate::context::Context;
use crate::errors::ApiError;
use crate::services::package::PackageService;
use crate::services::release::ReleaseService;

// The Dashboard Handlers. These render the same service data the API
// handlers return, as HTML.

/// The package index.
pub async fn index(State(ctx): State<Arc<Context>>) -> Response {
    match PackageService::list(&ctx, None, None, None) {
        Ok(packages) => {
            let mut tctx = base_context();
            tctx.insert("packages", &packages);
            render(&ctx, "index.html", tctx, StatusCode::OK)
        }
        Err(err) => render_error(&ctx, err),
    }
}

/// A single package with its metadata and default values.
pub async fn package(
    Path((name, version)): Path<(String, String)>,
    State(ctx): State<Arc<Context>>,
) -> Response {
    let detail = match PackageService::detail(&ctx, &name, None, Some(&version)) {
        Ok(detail) => detail,
        Err(err) => return render_error(&ctx, err),
    };

    // The raw values are decoration on this page; a chart that cannot be
    // pulled still gets its metadata rendered.
    let chart_ref = format!("{}/{}", detail.repo, detail.name);
    let values = ctx.helm.show_values(&chart_ref, Some(&detail.version)).await.unwrap_or_default();

    let mut tctx = base_context();
    tctx.insert("package", &detail);
    tctx.insert("values", &values);
    render(&ctx, "package.html", tctx, StatusCode::OK)
}

/// The release overview.
pub async fn releases(State(ctx): State<Arc<Context>>) -> Response {
    match ReleaseService::list(&ctx).await {
        Ok(releases) => {
            let mut tctx = base_context();
            tctx.insert("releases", &releases);
            render(&ctx, "releases.html", tctx, StatusCode::OK)
        }
        Err(err) => render_error(&ctx, err),
    }
}

fn base_context() -> tera::Context {
    let mut tctx = tera::Context::new();
    tctx.insert("generated_at", &Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    tctx
}

fn render(ctx: &Context, template: &str, tctx: tera::Context, status: StatusCode) -> Response {
    match ctx.templates.render(template, &tctx) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            error!(%template, error = %err, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html("template rendering failed".to_string()))
                .into_response()
        }
    }
}

fn render_error(ctx: &Context, err: ApiError) -> Response {
    let status = err.status_code();
    let mut tctx = base_context();
    tctx.insert("status", &status.as_u16());
    tctx.insert("message", &err.to_string());
    render(ctx, "error.html", tctx, status)
}
