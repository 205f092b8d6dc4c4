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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelmError {
    #[error("CommandSpawnError: {command}: {source}")]
    CommandSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CommandFailed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("InvalidUtf8Output: {0}")]
    InvalidUtf8Output(#[source] std::string::FromUtf8Error),

    #[error("JsonOutputError: {0}")]
    JsonOutputError(#[source] serde_json::Error),

    #[error("ValuesSerializationError: {0}")]
    ValuesSerializationError(#[source] serde_yaml::Error),

    #[error("ValuesFileError: {0}")]
    ValuesFileError(#[source] std::io::Error),

    #[error("RepositoryFileError: {path}: {reason}")]
    RepositoryFileError { path: String, reason: String },

    #[error("PackageNotFound: {0}")]
    PackageNotFound(String),

    #[error("ReleaseNotFound: {0}")]
    ReleaseNotFound(String),

    #[error("InvalidVersionConstraint: {0}")]
    InvalidVersionConstraint(#[source] semver::Error),
}

pub type Result<T, E = HelmError> = std::result::Result<T, E>;
