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
pub enum DataportenError {
    #[error("HttpError: {0}")]
    HttpError(#[source] reqwest::Error),

    #[error("InvalidUrl: {0}")]
    InvalidUrl(#[source] url::ParseError),

    #[error("UnexpectedStatus: {operation} returned {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("InvalidClientSettings: {0}")]
    InvalidClientSettings(String),
}

pub type Result<T, E = DataportenError> = std::result::Result<T, E>;
