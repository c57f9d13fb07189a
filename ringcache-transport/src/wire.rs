//  Copyright 2026 ringcache authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

/// Errors that can occur while serving or dispatching a peer request.
///
/// `GroupNotFound` is spec.md's distinguished error code; `Conflict` is a
/// distinct kind for a duplicate group registration (spec.md §4.8) — kept
/// separate from `GroupNotFound` so a 404-on-miss and a 409-on-duplicate
/// are never confused at the HTTP boundary. Everything else is a generic
/// transport or origin failure surfaced to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("group not found: {0}")]
    GroupNotFound(String),
    #[error("group already registered: {0}")]
    Conflict(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("loader error: {0}")]
    Origin(String),
    #[error("peer request failed: {0}")]
    Network(String),
    #[error("peer returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}
