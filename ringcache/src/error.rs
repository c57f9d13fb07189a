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

/// Error kinds surfaced by the core (spec.md §7).
///
/// `Clone` is required so a single flight's outcome can be delivered to every
/// waiter (spec.md §4.5) without re-running the loader.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The caller passed an empty key. Never reaches the cache, ring, or
    /// flight registry.
    #[error("key is required")]
    InvalidArgument,

    /// Server-side routing error: the requested group name has no registered
    /// `Group`. Distinguished per spec.md §6/§7.
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// `Registry::register` was called with a name that is already taken.
    /// Kept distinct from `GroupNotFound` (spec.md §4.8): one means "no such
    /// group", the other means "a group by this name already exists" —
    /// conflating them would surface a duplicate registration as a 404.
    #[error("group already registered: {0}")]
    DuplicateGroup(String),

    /// The loader returned an error. Terminal for the lookup; never cached.
    #[error("loader error: {0}")]
    Loader(String),

    /// A peer RPC failed (network error, bad status, malformed body). The
    /// group recovers by falling back to the local loader in the same
    /// flight; this variant is only ever observed if that fallback *also*
    /// fails and both errors get folded together by the caller.
    #[error("peer request failed: {0}")]
    Peer(String),

    /// The work driving a single-flight panicked. Converted from
    /// `tokio::task::JoinError` so the flight registry is never left with a
    /// dangling descriptor (spec.md §4.5, §7.5).
    #[error("loader or peer call panicked: {0}")]
    Panicked(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Panicked(e.to_string())
    }
}

/// A single-flight leader was dropped before it could notify its waiters.
/// Converted rather than left to panic a waiting caller (spec.md §5: loads
/// must complete, or fail cleanly, even if the initiating caller gives up).
impl From<ringcache_memory::FlightLost> for Error {
    fn from(_: ringcache_memory::FlightLost) -> Self {
        Error::Panicked("single-flight leader was dropped before completing".to_string())
    }
}

impl From<ringcache_transport::TransportError> for Error {
    fn from(e: ringcache_transport::TransportError) -> Self {
        match e {
            ringcache_transport::TransportError::GroupNotFound(msg) => Error::GroupNotFound(msg),
            ringcache_transport::TransportError::Conflict(msg) => Error::DuplicateGroup(msg),
            ringcache_transport::TransportError::InvalidArgument(_) => Error::InvalidArgument,
            ringcache_transport::TransportError::Origin(msg) => Error::Loader(msg),
            other => Error::Peer(other.to_string()),
        }
    }
}

impl From<Error> for ringcache_transport::TransportError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidArgument => ringcache_transport::TransportError::InvalidArgument(e.to_string()),
            Error::GroupNotFound(name) => ringcache_transport::TransportError::GroupNotFound(name),
            Error::DuplicateGroup(name) => ringcache_transport::TransportError::Conflict(name),
            Error::Loader(msg) => ringcache_transport::TransportError::Origin(msg),
            Error::Peer(msg) => ringcache_transport::TransportError::Network(msg),
            Error::Panicked(msg) => ringcache_transport::TransportError::Network(msg),
        }
    }
}
