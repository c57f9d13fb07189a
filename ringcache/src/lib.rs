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

//! The ringcache group lookup state machine: given a key, probe the local
//! cache, then — with at most one in-flight load per key — consult the peer
//! picker and fall back to the embedder-supplied origin loader, populating
//! the local cache on every origin load.
//!
//! This crate composes [`ringcache_memory`] (the LRU store, the safe-cache
//! facade, and single-flight) with [`ringcache_transport`] (the consistent
//! hash ring and the HTTP peer client/server) the way the teacher's
//! top-level `foyer` crate composes `foyer-memory` and `foyer-storage`.

mod config;
mod error;
mod group;
mod registry;

pub use config::{GroupConfig, NodeConfig};
pub use error::Error;
pub use group::{FnLoader, Group, Loader};
pub use registry::Registry;

pub use ringcache_memory::ByteView;
pub use ringcache_transport::{
    router, GroupDirectory, HttpPeerClient, PeerGetter, PeerPicker, RingPeerPicker, DEFAULT_BASE_PATH,
    DEFAULT_REPLICAS,
};
