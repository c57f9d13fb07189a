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

//! Consistent-hash peer selection and the HTTP peer client/server transport.
//!
//! This crate has no dependency on the group lookup state machine or the
//! process-wide registry (see the `ringcache` crate): [`server::GroupDirectory`]
//! is the seam the orchestration layer plugs into, so this crate only ever
//! depends on `ringcache-memory` for [`ringcache_memory::ByteView`].

mod peer;
mod ring;
mod server;
mod wire;

pub use peer::{HttpPeerClient, PeerGetter, PeerPicker, RingPeerPicker};
pub use ring::{HashRing, DEFAULT_REPLICAS};
pub use server::{router, GroupDirectory, DEFAULT_BASE_PATH};
pub use wire::TransportError;
