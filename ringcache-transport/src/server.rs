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

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use ringcache_memory::ByteView;

use crate::wire::TransportError;

/// Default base path prefix, matching the original's `defaultBasePath`
/// (`cache/http.go`).
pub const DEFAULT_BASE_PATH: &str = "/cache/";

/// The server-side counterpart of the process-wide group directory (spec.md
/// §4.8). Defined here, in the transport crate, rather than depending on a
/// concrete `Group`/`Registry` type from the `ringcache` crate, so the
/// transport has no dependency on the orchestration layer above it — the
/// `ringcache` crate implements this trait for its registry and hands a
/// `Arc<dyn GroupDirectory>` to [`router`].
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    /// Looks up `group` and, if found, resolves `key` through it (a local
    /// probe, then single-flighted peer-or-origin load). Returns
    /// `TransportError::GroupNotFound` for an unregistered group name, the
    /// distinguished error spec.md §6/§7 calls for.
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError>;
}

/// Builds the axum router serving `GET {base_path}{group}/{key}`.
///
/// On success: `200 OK`, `Content-Type: application/octet-stream`, raw value
/// bytes. `TransportError::GroupNotFound` maps to `404`, `Conflict` to `409`;
/// any other error (loader failure, invalid argument) maps to `500` with the
/// error's message as the body — the HTTP analogue of spec.md §7's error
/// kinds.
pub fn router(directory: Arc<dyn GroupDirectory>, base_path: &str) -> Router {
    let base = base_path.trim_end_matches('/');
    Router::new()
        .route(&format!("{base}/:group/:key"), get(handle_get))
        .with_state(directory)
}

async fn handle_get(
    State(directory): State<Arc<dyn GroupDirectory>>,
    Path((group, key)): Path<(String, String)>,
) -> Response {
    tracing::debug!(%group, %key, "GET");
    match directory.get(&group, &key).await {
        Ok(value) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/octet-stream")],
            value.copy_out(),
        )
            .into_response(),
        Err(TransportError::GroupNotFound(msg)) => (StatusCode::NOT_FOUND, msg).into_response(),
        Err(TransportError::Conflict(msg)) => (StatusCode::CONFLICT, msg).into_response(),
        Err(TransportError::InvalidArgument(msg)) => (StatusCode::BAD_REQUEST, msg).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct StubDirectory;

    #[async_trait]
    impl GroupDirectory for StubDirectory {
        async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError> {
            match group {
                "scores" if key == "jack" => Ok(ByteView::from("256")),
                "scores" => Err(TransportError::Origin(format!("{key} not exist"))),
                "taken" => Err(TransportError::Conflict(group.to_string())),
                _ => Err(TransportError::GroupNotFound(group.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn serves_a_hit_with_octet_stream_body() {
        let app = router(Arc::new(StubDirectory), DEFAULT_BASE_PATH);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/cache/scores/jack")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"256");
    }

    #[tokio::test]
    async fn unknown_group_is_404() {
        let app = router(Arc::new(StubDirectory), DEFAULT_BASE_PATH);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/cache/unknown/jack")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_group_is_409() {
        let app = router(Arc::new(StubDirectory), DEFAULT_BASE_PATH);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/cache/taken/jack")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn loader_error_is_500() {
        let app = router(Arc::new(StubDirectory), DEFAULT_BASE_PATH);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/cache/scores/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
