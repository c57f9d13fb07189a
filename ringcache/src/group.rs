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

use std::future::Future;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use ringcache_memory::{ByteView, SafeCache, SingleFlight};
use ringcache_transport::PeerPicker;

use crate::error::Error;

/// The embedder-supplied source of truth for a group: given a key, produce
/// the bytes of record or an error. Called at most once per key per
/// in-flight miss (spec.md §6) — the single-flight layer guarantees that,
/// not the loader itself, so loaders need not be idempotence-paranoid beyond
/// "safe to call again on a later, independent miss".
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, key: &str) -> Result<Vec<u8>, String>;
}

/// Wraps a plain async function as a [`Loader`], the same convenience the
/// original's `GetterFunc` provides over its `Getter` interface — a bare
/// function satisfying "key in, bytes-or-error out" is enough; implementing
/// the trait directly is never required.
pub struct FnLoader<F>(pub F);

#[async_trait]
impl<F, Fut> Loader for FnLoader<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<u8>, String>> + Send,
{
    async fn load(&self, key: &str) -> Result<Vec<u8>, String> {
        (self.0)(key.to_string()).await
    }
}

/// A named cache namespace: its own byte budget, loader, and (optional,
/// set-once) peer picker — spec.md §3 "Group".
pub struct Group {
    name: String,
    cache: Arc<SafeCache>,
    loader: Arc<dyn Loader>,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    flight: SingleFlight<ByteView, Error>,
    /// Whether a successful remote-peer fetch also populates this node's
    /// local cache. spec.md §4.7 leaves this as an explicit choice; we do
    /// *not* populate on remote hit (see DESIGN.md, Open Question 1) — the
    /// authoritative peer already caches the value, and double-storing it
    /// here buys nothing but memory pressure on a non-authoritative node.
    populate_on_remote_hit: bool,
}

impl Group {
    pub fn new(name: impl Into<String>, cache_bytes: usize, loader: Arc<dyn Loader>) -> Self {
        Self {
            name: name.into(),
            cache: Arc::new(SafeCache::new(cache_bytes)),
            loader,
            peers: OnceLock::new(),
            flight: SingleFlight::new(),
            populate_on_remote_hit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers the peer picker used to route misses to the authoritative
    /// peer. May be called at most once per group — a second call is a
    /// programming error and panics, matching spec.md §9 ("a group's peer
    /// picker, once set, is not replaced") and the original's
    /// `panic("group's peer called more than once")`.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) {
        if self.peers.set(picker).is_err() {
            panic!("group {:?}'s peer picker was registered more than once", self.name);
        }
    }

    /// Resolves `key`: local hit, or a single-flighted peer-then-origin load.
    pub async fn get(&self, key: &str) -> Result<ByteView, Error> {
        if key.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if let Some(value) = self.cache.get(key) {
            tracing::debug!(group = %self.name, %key, "cache hit");
            return Ok(value);
        }
        self.load(key).await
    }

    /// Identical to [`Group::get`] but always goes through the origin loader
    /// path, never consulting the peer picker. This is what the transport
    /// server calls on the authoritative node: once a request has already
    /// been routed to the peer that owns `key`, it must not bounce the
    /// request back out to a peer again.
    pub async fn get_locally(&self, key: &str) -> Result<ByteView, Error> {
        if key.is_empty() {
            return Err(Error::InvalidArgument);
        }
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }
        self.load_from_origin(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView, Error> {
        let cache = self.cache.clone();
        let loader = self.loader.clone();
        let peer = self.peers.get().and_then(|picker| picker.pick_peer(key));
        let name = self.name.clone();
        let populate_on_remote_hit = self.populate_on_remote_hit;
        let key_owned = key.to_string();

        self.flight
            .work(key, move || async move {
                if let Some(peer) = peer {
                    match peer.get(&name, &key_owned).await {
                        Ok(value) => {
                            if populate_on_remote_hit {
                                cache.add(key_owned.clone(), value.clone());
                            }
                            return Ok(value);
                        }
                        Err(err) => {
                            tracing::warn!(group = %name, key = %key_owned, error = %err, "peer fetch failed, falling back to origin");
                        }
                    }
                }
                load_from_origin_and_populate(&name, &cache, loader.as_ref(), &key_owned).await
            })
            .await
    }

    async fn load_from_origin(&self, key: &str) -> Result<ByteView, Error> {
        let cache = self.cache.clone();
        let loader = self.loader.clone();
        let name = self.name.clone();
        let key_owned = key.to_string();
        self.flight
            .work(key, move || async move {
                load_from_origin_and_populate(&name, &cache, loader.as_ref(), &key_owned).await
            })
            .await
    }
}

async fn load_from_origin_and_populate(
    group_name: &str,
    cache: &SafeCache,
    loader: &dyn Loader,
    key: &str,
) -> Result<ByteView, Error> {
    let bytes = loader.load(key).await.map_err(Error::Loader)?;
    let value = ByteView::from(bytes);
    cache.add(key.to_string(), value.clone());
    tracing::debug!(group = %group_name, %key, "populated from origin");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn scores_loader(calls: Arc<AtomicUsize>) -> Arc<dyn Loader> {
        Arc::new(FnLoader(move |key: String| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                match key.as_str() {
                    "jack" => Ok(b"256".to_vec()),
                    "tom" => Ok(b"34385".to_vec()),
                    "lucy" => Ok(b"125".to_vec()),
                    _ => Err(format!("{key} not exist")),
                }
            }
        }))
    }

    #[tokio::test]
    async fn hit_after_miss_does_not_call_loader_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = Group::new("scores", 1 << 20, scores_loader(calls.clone()));

        assert_eq!(group.get("jack").await.unwrap(), ByteView::from("256"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(group.get("jack").await.unwrap(), ByteView::from("256"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_key_errors_and_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = Group::new("scores", 1 << 20, scores_loader(calls));

        let err = group.get("unknown").await.unwrap_err();
        assert!(err.to_string().contains("not exist"));
        // a second lookup must re-invoke the loader: nothing was cached.
        let err2 = group.get("unknown").await.unwrap_err();
        assert!(err2.to_string().contains("not exist"));
    }

    #[tokio::test]
    async fn empty_key_is_invalid_argument_and_never_touches_loader() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = Group::new("scores", 1 << 20, scores_loader(calls.clone()));
        let err = group.get("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_misses_for_the_same_key_collapse_into_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let group = Arc::new(Group::new(
            "slow",
            1 << 20,
            Arc::new(FnLoader(move |_key: String| {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(80)).await;
                    Ok(b"v".to_vec())
                }
            })) as Arc<dyn Loader>,
        ));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let group = group.clone();
            handles.push(tokio::spawn(async move { group.get("slow").await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), ByteView::from("v"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "peer picker was registered more than once")]
    async fn registering_peers_twice_panics() {
        let calls = Arc::new(AtomicUsize::new(0));
        let group = Group::new("scores", 1 << 20, scores_loader(calls));
        struct NoPeers;
        impl PeerPicker for NoPeers {
            fn pick_peer(&self, _key: &str) -> Option<Arc<dyn ringcache_transport::PeerGetter>> {
                None
            }
        }
        group.register_peers(Arc::new(NoPeers));
        group.register_peers(Arc::new(NoPeers));
    }
}
