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

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ReadError: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("ParseError: {0}")]
    ParseError(#[source] serde_yaml::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// One entry of the static namespace/subject mapping file (`subjects.yml`).
///
/// The mapping is reference data maintained by operators, never written by
/// the appstore itself. A subject is typically a Dataporten group id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMapping {
    /// The Kubernetes namespace this entry grants access to.
    pub id: String,
    /// Human readable description shown to end users.
    #[serde(default)]
    pub description: String,
    /// Subject (group) ids allowed to deploy into the namespace.
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Loads the namespace/subject mapping from a YAML file.
pub fn load_namespace_mappings(path: impl AsRef<Path>) -> Result<Vec<NamespaceMapping>> {
    let raw = fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadError)?;
    serde_yaml::from_str(&raw).map_err(ConfigError::ParseError)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const MAPPING: &str = r#"
- id: test-namespace
  description: A namespace for testing
  subjects:
    - "fc:org:example.org"
    - "fc:adhoc:b1ad23c5"
- id: prod
  subjects:
    - "fc:org:example.org:unit:IT"
"#;

    #[test]
    fn test_load_namespace_mappings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MAPPING.as_bytes()).unwrap();

        let mappings = load_namespace_mappings(file.path()).unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].id, "test-namespace");
        assert_eq!(mappings[0].subjects.len(), 2);
        assert_eq!(mappings[1].description, "");
        assert_eq!(mappings[1].subjects, vec!["fc:org:example.org:unit:IT"]);
    }

    #[test]
    fn test_load_namespace_mappings_missing_file() {
        let err = load_namespace_mappings("/nonexistent/subjects.yml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_load_namespace_mappings_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"id: [unbalanced").unwrap();

        let err = load_namespace_mappings(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
