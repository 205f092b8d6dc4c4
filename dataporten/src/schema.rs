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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{DataportenError, Result};

/// Key under which a release's OAuth registration result is stored in its
/// chart values, so it can be recovered at delete time.
pub const APPSTORE_SETTINGS_KEY: &str = "dataporten_appstore_settings";

/// 'Client' is Dataporten's internal name for applications.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub name: String,
    pub scopes_requested: Vec<String>,
    pub redirect_uri: Vec<String>,
    #[serde(rename = "descr", default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
}

impl ClientSettings {
    /// Extracts OAuth client settings from a chart values map.
    ///
    /// A chart requests a client by carrying a `secrets.dataporten` subtree
    /// in its values; charts without one yield `Ok(None)`. A subtree that
    /// is present but incomplete is a user error.
    pub fn from_values(values: &Map<String, Value>) -> Result<Option<ClientSettings>> {
        let subtree = values
            .get("secrets")
            .and_then(Value::as_object)
            .and_then(|secrets| secrets.get("dataporten"))
            .and_then(Value::as_object);

        let Some(settings) = subtree else {
            return Ok(None);
        };

        let name = settings
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| DataportenError::InvalidClientSettings("dataporten name missing".into()))?;

        let scopes_requested = string_list(settings, "scopes_requested")
            .ok_or_else(|| DataportenError::InvalidClientSettings("dataporten scopes missing".into()))?;

        let redirect_uri = string_list(settings, "redirect_uri").ok_or_else(|| {
            DataportenError::InvalidClientSettings("dataporten redirect uri missing".into())
        })?;

        Ok(Some(ClientSettings {
            name: name.to_string(),
            scopes_requested,
            redirect_uri,
            description: String::new(),
            client_secret: String::new(),
        }))
    }
}

/// The IdP's response to a client registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterClientResult {
    #[serde(default)]
    pub client_secret: String,
    #[serde(rename = "id")]
    pub client_id: String,
    #[serde(default)]
    pub owner: String,
}

/// A group the authenticated user is a member of.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
}

/// Recovers the registered client id from stored release values.
pub fn client_id_from_values(values: &Map<String, Value>) -> Option<String> {
    values
        .get(APPSTORE_SETTINGS_KEY)
        .and_then(Value::as_object)
        .and_then(|details| details.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

// Non-string entries are skipped rather than rejected.
fn string_list(settings: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let list = settings.get(key)?.as_array()?;
    Some(list.iter().filter_map(Value::as_str).map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_from_values_absent() {
        assert_eq!(ClientSettings::from_values(&values(json!({}))).unwrap(), None);
        // a non-map secrets entry is treated as "no client requested"
        assert_eq!(
            ClientSettings::from_values(&values(json!({"secrets": "oops"}))).unwrap(),
            None
        );
        assert_eq!(
            ClientSettings::from_values(&values(json!({"secrets": {"other": {}}}))).unwrap(),
            None
        );
    }

    #[test]
    fn test_from_values_complete() {
        let settings = ClientSettings::from_values(&values(json!({
            "secrets": {"dataporten": {
                "name": "my-app",
                "scopes_requested": ["groups", 42, "profile"],
                "redirect_uri": ["https://my-app.example.org/callback"],
            }}
        })))
        .unwrap()
        .unwrap();

        assert_eq!(settings.name, "my-app");
        // the non-string entry is skipped
        assert_eq!(settings.scopes_requested, vec!["groups", "profile"]);
        assert_eq!(settings.redirect_uri, vec!["https://my-app.example.org/callback"]);
        assert!(settings.client_secret.is_empty());
    }

    #[test]
    fn test_from_values_incomplete() {
        let err = ClientSettings::from_values(&values(json!({
            "secrets": {"dataporten": {"name": "my-app"}}
        })))
        .unwrap_err();

        assert!(matches!(err, DataportenError::InvalidClientSettings(_)));
    }

    #[test]
    fn test_register_result_uses_idp_field_names() {
        let result: RegisterClientResult =
            serde_json::from_value(json!({"id": "c-123", "client_secret": "s3cret", "owner": "me"}))
                .unwrap();
        assert_eq!(result.client_id, "c-123");

        let round = serde_json::to_value(&result).unwrap();
        assert_eq!(round["id"], "c-123");
    }

    #[test]
    fn test_client_id_from_values() {
        let stored = values(json!({
            APPSTORE_SETTINGS_KEY: {"id": "c-123", "client_secret": "s3cret"}
        }));
        assert_eq!(client_id_from_values(&stored), Some("c-123".to_string()));
        assert_eq!(client_id_from_values(&values(json!({}))), None);
    }
}
