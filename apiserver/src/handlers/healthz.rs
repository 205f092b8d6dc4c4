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
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::context::Context;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthInfo {
    pub version: String,
    /// Seconds since the server started, floored.
    pub uptime: u64,
    pub pid: u32,
    /// Available runtime parallelism.
    pub workers: usize,
}

/// Liveness probe.
#[utoipa::path(
    get, path = "/healthz",
    responses((status = 200, description = "The server is alive", body = HealthInfo)),
    tag = "Health"
)]
pub async fn healthz(State(ctx): State<Arc<Context>>) -> Json<HealthInfo> {
    Json(HealthInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: ctx.started_at.elapsed().as_secs(),
        pid: std::process::id(),
        workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
    })
}
