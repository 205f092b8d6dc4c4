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

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::ApiError;

/// The header end users pass their identity-provider token in.
pub const TOKEN_HEADER: &str = "x-dataporten-token";

/// The caller's identity-provider token, when one was sent.
///
/// Extraction never rejects; operations that need the IdP call
/// [`MaybeToken::require`] and answer 400 when the header is absent, the
/// rest ignore it.
#[derive(Debug, Clone)]
pub struct MaybeToken(pub Option<String>);

impl MaybeToken {
    pub fn require(&self) -> Result<&str, ApiError> {
        self.0.as_deref().ok_or(ApiError::MissingToken)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(MaybeToken(token))
    }
}
