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

use appstore_common::config::NamespaceMapping;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A namespace the calling user is allowed to deploy into.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct NamespaceResponse {
    /// The Kubernetes namespace.
    pub id: String,
    pub description: String,
    /// Subject (group) ids granted access.
    pub subjects: Vec<String>,
}

impl From<NamespaceMapping> for NamespaceResponse {
    fn from(mapping: NamespaceMapping) -> Self {
        Self { id: mapping.id, description: mapping.description, subjects: mapping.subjects }
    }
}
