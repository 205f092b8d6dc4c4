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

use appstore_dataporten::DataportenError;
use appstore_helm::HelmError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing X-Dataporten-Token")]
    MissingToken,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Helm Error: {0}")]
    Helm(#[from] HelmError),

    #[error("Dataporten Error: {0}")]
    Dataporten(#[from] DataportenError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Helm(HelmError::PackageNotFound(_)) | Self::Helm(HelmError::ReleaseNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Helm(HelmError::InvalidVersionConstraint(_)) => StatusCode::BAD_REQUEST,
            // the IdP's verdict is passed through, e.g. 401 on a stale token
            Self::Dataporten(DataportenError::UnexpectedStatus { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Dataporten(DataportenError::InvalidClientSettings(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = (self.status_code(), self.to_string());
        error!("{} - {}", status, message);
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Helm(HelmError::PackageNotFound("mysql".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Helm(HelmError::CommandFailed { command: "helm".into(), stderr: "boom".into() })
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Dataporten(DataportenError::UnexpectedStatus {
                operation: "register client",
                status: 401
            })
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
