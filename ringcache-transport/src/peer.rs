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

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use ringcache_memory::ByteView;

use crate::ring::HashRing;
use crate::wire::TransportError;

/// Client capability: fetch `key` from `group` on a single remote peer.
///
/// Unary request/response only, matching spec.md §4.6 — no streaming.
/// Connection handling is a quality-of-implementation choice; the HTTP
/// implementation below establishes a connection per call via a shared,
/// pooled `reqwest::Client`.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError>;
}

/// Maps a key to the peer client authoritative for it. Returns `None` when
/// the local node is itself authoritative for `key`, or when no peers are
/// registered — the caller then falls through to its own loader, which
/// prevents an infinite remote-dispatch loop on the authoritative node.
pub trait PeerPicker: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// An HTTP-based [`PeerGetter`] using the `{base}/{escaped-group}/{escaped-key}`
/// convention from spec.md §6.
pub struct HttpPeerClient {
    base_url: String,
    base_path: String,
    http: reqwest::Client,
}

impl HttpPeerClient {
    pub fn new(base_url: impl Into<String>, base_path: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: base_path.into(),
            http,
        }
    }
}

#[async_trait]
impl PeerGetter for HttpPeerClient {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError> {
        let group_enc = utf8_percent_encode(group, NON_ALPHANUMERIC);
        let key_enc = utf8_percent_encode(key, NON_ALPHANUMERIC);
        let url = format!(
            "{}{}{}/{}",
            self.base_url.trim_end_matches('/'),
            self.base_path,
            group_enc,
            key_enc
        );
        tracing::debug!(%url, "fetching from peer");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::GroupNotFound(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;
        Ok(ByteView::from(bytes.to_vec()))
    }
}

/// The production [`PeerPicker`]: a consistent-hash ring plus a map from peer
/// identity to its client.
pub struct RingPeerPicker {
    self_id: String,
    ring: RwLock<HashRing>,
    clients: RwLock<HashMap<String, Arc<dyn PeerGetter>>>,
}

impl RingPeerPicker {
    pub fn new(self_id: impl Into<String>, replicas: usize) -> Self {
        Self {
            self_id: self_id.into(),
            ring: RwLock::new(HashRing::new(replicas)),
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Registers peers and their clients. Safe to call more than once; later
    /// calls only add to the ring and client map (spec.md §9: consistent
    /// hash immutability — no peer removal).
    pub fn set_peers(&self, peers: Vec<(String, Arc<dyn PeerGetter>)>) {
        let ids: Vec<String> = peers.iter().map(|(id, _)| id.clone()).collect();
        self.ring.write().add(ids);
        let mut clients = self.clients.write();
        for (id, client) in peers {
            clients.insert(id, client);
        }
    }

    pub fn self_id(&self) -> &str {
        &self.self_id
    }
}

impl PeerPicker for RingPeerPicker {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let picked = self.ring.read().get(key)?.to_string();
        if picked == self.self_id {
            return None;
        }
        self.clients.read().get(&picked).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubPeer(&'static str);

    #[async_trait]
    impl PeerGetter for StubPeer {
        async fn get(&self, _group: &str, _key: &str) -> Result<ByteView, TransportError> {
            Ok(ByteView::from(self.0))
        }
    }

    #[test]
    fn self_identity_short_circuits_to_none() {
        let picker = RingPeerPicker::new("http://node-a:9999", 50);
        picker.set_peers(vec![
            ("http://node-a:9999".to_string(), Arc::new(StubPeer("a")) as Arc<dyn PeerGetter>),
            ("http://node-b:9999".to_string(), Arc::new(StubPeer("b")) as Arc<dyn PeerGetter>),
        ]);
        // every key resolves to *some* peer; whichever key maps to node-a
        // must short-circuit to None rather than a self-referential client.
        let mut saw_none_for_self = false;
        for i in 0..200 {
            let key = format!("k{i}");
            let ring_pick = picker.ring.read().get(&key).map(str::to_string);
            let picked = picker.pick_peer(&key);
            if ring_pick.as_deref() == Some("http://node-a:9999") {
                assert!(picked.is_none());
                saw_none_for_self = true;
            }
        }
        assert!(saw_none_for_self, "expected at least one key to map to self");
    }

    #[test]
    fn empty_ring_returns_none() {
        let picker = RingPeerPicker::new("http://node-a:9999", 50);
        assert!(picker.pick_peer("anything").is_none());
    }
}
