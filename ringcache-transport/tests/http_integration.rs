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

//! Drives `HttpPeerClient` against a real `router()` bound to a loopback
//! socket — the wire-format counterpart to `server.rs`'s in-process
//! `tower::ServiceExt::oneshot` tests, which never touch a socket at all.

use std::sync::Arc;

use async_trait::async_trait;
use ringcache_memory::ByteView;
use ringcache_transport::{router, GroupDirectory, HttpPeerClient, PeerGetter, TransportError, DEFAULT_BASE_PATH};

struct StubDirectory;

#[async_trait]
impl GroupDirectory for StubDirectory {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError> {
        match (group, key) {
            ("scores", "jack") => Ok(ByteView::from("256")),
            ("scores", _) => Err(TransportError::Origin(format!("{key} not exist"))),
            ("taken", _) => Err(TransportError::Conflict(group.to_string())),
            _ => Err(TransportError::GroupNotFound(group.to_string())),
        }
    }
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(StubDirectory), DEFAULT_BASE_PATH);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn http_peer_client_round_trips_a_hit_through_a_real_server() {
    let base_url = spawn_server().await;
    let client = HttpPeerClient::new(base_url, DEFAULT_BASE_PATH, reqwest::Client::new());

    let value = client.get("scores", "jack").await.unwrap();
    assert_eq!(value, ByteView::from("256"));
}

#[tokio::test]
async fn http_peer_client_maps_group_not_found_from_a_real_server() {
    let base_url = spawn_server().await;
    let client = HttpPeerClient::new(base_url, DEFAULT_BASE_PATH, reqwest::Client::new());

    let err = client.get("unknown", "jack").await.unwrap_err();
    assert!(matches!(err, TransportError::GroupNotFound(_)));
}

#[tokio::test]
async fn http_peer_client_maps_a_server_side_loader_error_to_unexpected_status() {
    let base_url = spawn_server().await;
    let client = HttpPeerClient::new(base_url, DEFAULT_BASE_PATH, reqwest::Client::new());

    let err = client.get("scores", "ghost").await.unwrap_err();
    assert!(matches!(err, TransportError::UnexpectedStatus { status: 500, .. }));
}
