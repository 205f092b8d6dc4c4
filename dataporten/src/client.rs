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

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::errors::{DataportenError, Result};
use crate::schema::{ClientSettings, Group, RegisterClientResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the identity provider's client-administration and
/// group APIs. All calls act on behalf of the end user via their token.
#[derive(Debug, Clone)]
pub struct DataportenClient {
    http: reqwest::Client,
    clients_url: Url,
    groups_url: Url,
}

impl DataportenClient {
    pub fn new(clients_url: &str, groups_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DataportenError::HttpError)?;

        Ok(Self {
            http,
            clients_url: parse_base(clients_url)?,
            groups_url: Url::parse(groups_url).map_err(DataportenError::InvalidUrl)?,
        })
    }

    /// Registers an OAuth client, generating a secret when none was given.
    /// The IdP answers 201 on success.
    pub async fn register_client(
        &self,
        settings: &ClientSettings,
        token: &str,
    ) -> Result<RegisterClientResult> {
        let mut settings = settings.clone();
        if settings.client_secret.is_empty() {
            settings.client_secret = Uuid::new_v4().to_string();
        }

        debug!(name = %settings.name, "registering dataporten client");
        let response = self
            .http
            .post(self.clients_url.clone())
            .bearer_auth(token)
            .json(&settings)
            .send()
            .await
            .map_err(DataportenError::HttpError)?;

        if response.status() != StatusCode::CREATED {
            return Err(DataportenError::UnexpectedStatus {
                operation: "register client",
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(DataportenError::HttpError)
    }

    /// Deletes a previously registered OAuth client.
    pub async fn delete_client(&self, client_id: &str, token: &str) -> Result<()> {
        let url = self.clients_url.join(client_id).map_err(DataportenError::InvalidUrl)?;

        debug!(%client_id, "deleting dataporten client");
        let response = self
            .http
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(DataportenError::HttpError)?;

        if response.status() != StatusCode::OK {
            return Err(DataportenError::UnexpectedStatus {
                operation: "delete client",
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }

    /// The groups the calling user is a member of.
    pub async fn member_groups(&self, token: &str) -> Result<Vec<Group>> {
        let response = self
            .http
            .get(self.groups_url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(DataportenError::HttpError)?;

        if response.status() != StatusCode::OK {
            return Err(DataportenError::UnexpectedStatus {
                operation: "fetch groups",
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(DataportenError::HttpError)
    }
}

// Relative joins drop the last path segment unless the base ends with '/'.
fn parse_base(url: &str) -> Result<Url> {
    let normalized = if url.ends_with('/') { url.to_string() } else { format!("{url}/") };
    Url::parse(&normalized).map_err(DataportenError::InvalidUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_gets_trailing_slash() {
        let client = DataportenClient::new(
            "https://clientadmin.dataporten-api.no/clients",
            "https://groups-api.dataporten.no/groups/me/groups",
        )
        .unwrap();

        let delete_url = client.clients_url.join("c-123").unwrap();
        assert_eq!(
            delete_url.as_str(),
            "https://clientadmin.dataporten-api.no/clients/c-123"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            DataportenClient::new("not a url", "https://groups-api.dataporten.no/"),
            Err(DataportenError::InvalidUrl(_))
        ));
    }
}
