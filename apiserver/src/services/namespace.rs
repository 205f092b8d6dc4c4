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

use std::collections::HashSet;

use appstore_common::config::{load_namespace_mappings, NamespaceMapping};

use crate::context::Context;
use crate::errors::ApiError;
use crate::responses::namespace::NamespaceResponse;
use crate::services::Result;

pub struct NamespaceService;

impl NamespaceService {
    /// The namespaces the calling user may deploy into: the entries of the
    /// static mapping file whose allowed subjects intersect the user's
    /// group memberships.
    pub async fn allowed(ctx: &Context, token: &str) -> Result<Vec<NamespaceResponse>> {
        let groups = ctx.dataporten.member_groups(token).await?;
        let group_ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();

        let mappings = load_namespace_mappings(&ctx.config.namespace_mappings).map_err(|err| {
            tracing::error!(error = %err, "namespace mapping file unreadable");
            ApiError::Internal("could not load namespace to subject mapping".to_string())
        })?;

        Ok(allowed_namespaces(mappings, &group_ids).into_iter().map(NamespaceResponse::from).collect())
    }
}

fn allowed_namespaces(
    mappings: Vec<NamespaceMapping>,
    group_ids: &HashSet<&str>,
) -> Vec<NamespaceMapping> {
    mappings
        .into_iter()
        .filter(|mapping| mapping.subjects.iter().any(|subject| group_ids.contains(subject.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(id: &str, subjects: &[&str]) -> NamespaceMapping {
        NamespaceMapping {
            id: id.to_string(),
            description: String::new(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_allowed_namespaces_intersection() {
        let mappings = vec![
            mapping("research", &["fc:org:example.org", "fc:adhoc:b1ad23c5"]),
            mapping("prod", &["fc:org:example.org:unit:IT"]),
            mapping("open", &[]),
        ];
        let groups: HashSet<&str> = ["fc:org:example.org"].into_iter().collect();

        let allowed = allowed_namespaces(mappings, &groups);
        assert_eq!(allowed.len(), 1);
        assert_eq!(allowed[0].id, "research");
    }

    #[test]
    fn test_membership_in_several_subjects_yields_one_entry() {
        let mappings = vec![mapping("research", &["fc:org:example.org", "fc:adhoc:b1ad23c5"])];
        let groups: HashSet<&str> = ["fc:org:example.org", "fc:adhoc:b1ad23c5"].into_iter().collect();

        assert_eq!(allowed_namespaces(mappings, &groups).len(), 1);
    }
}
