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

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::context::Context;
use crate::handlers;

pub fn build() -> Router<Arc<Context>> {
    Router::new()
        // packages
        .route("/api/v1/packages", get(handlers::package::list))
        .route("/api/v1/packages/:name", get(handlers::package::detail))
        .route("/api/v1/packages/:name/values", get(handlers::package::values))
        //
        // releases
        .route("/api/v1/releases", get(handlers::release::list))
        .route("/api/v1/releases", post(handlers::release::install))
        .route("/api/v1/releases/:name", get(handlers::release::detail))
        .route("/api/v1/releases/:name", patch(handlers::release::upgrade))
        .route("/api/v1/releases/:name", delete(handlers::release::delete))
        .route("/api/v1/releases/:name/status", get(handlers::release::status))
        //
        // namespaces
        .route("/api/v1/namespaces", get(handlers::namespace::list))
        //
        // dashboard + health
        .route("/", get(handlers::dashboard::index))
        .route("/package/:name/:version", get(handlers::dashboard::package))
        .route("/releases", get(handlers::dashboard::releases))
        .route("/healthz", get(handlers::healthz::healthz))
}
