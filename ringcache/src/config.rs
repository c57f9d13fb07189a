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

/// Per-group configuration: name, byte budget, and (elsewhere) the loader
/// supplied by the embedder — spec.md §6 "Configuration".
#[derive(Debug, Clone)]
pub struct GroupConfig {
    pub name: String,
    /// Byte budget for the group's LRU store. Zero means unbounded.
    pub cache_bytes: usize,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, cache_bytes: usize) -> Self {
        Self {
            name: name.into(),
            cache_bytes,
        }
    }
}

/// Per-node configuration: this node's own identity (used for the
/// self-vs-peer short circuit), the peer set, the ring's replication factor,
/// and the address to listen on.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// This node's identity, e.g. `http://10.0.0.1:9999`. Compared against
    /// the ring's pick by raw string equality (spec.md §9) — callers must
    /// normalise identities before constructing a `NodeConfig` if their
    /// peer addresses might otherwise differ only cosmetically (trailing
    /// slash, scheme casing). `ringcache-cli` does this normalisation at
    /// config-load time; this type stores whatever string it is given.
    pub self_id: String,
    pub peers: Vec<String>,
    pub replicas: usize,
    pub listen_addr: String,
}

impl NodeConfig {
    pub fn new(self_id: impl Into<String>, listen_addr: impl Into<String>) -> Self {
        Self {
            self_id: self_id.into(),
            peers: Vec::new(),
            replicas: ringcache_transport::DEFAULT_REPLICAS,
            listen_addr: listen_addr.into(),
        }
    }

    pub fn with_peers(mut self, peers: Vec<String>) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }
}
