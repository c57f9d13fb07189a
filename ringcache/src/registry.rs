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
use ringcache_memory::ByteView;
use ringcache_transport::{GroupDirectory, TransportError};

use crate::error::Error;
use crate::group::Group;

/// Maps a group name to at most one [`Group`] for the process lifetime
/// (spec.md §4.8). Kept as an explicit, embedder-owned object — injected
/// into the transport server — rather than process-global mutable state,
/// per spec.md §9's guidance for platforms that prefer explicit
/// initialisation; the by-name lookup semantics at the server boundary are
/// unchanged.
#[derive(Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `group` under its own name. Rejects a duplicate name rather
    /// than silently overwriting — spec.md §4.8 notes the reference
    /// implementation overwrites silently but recommends implementers
    /// reject duplicates instead.
    pub fn register(&self, group: Arc<Group>) -> Result<(), Error> {
        let mut groups = self.groups.write();
        if groups.contains_key(group.name()) {
            return Err(Error::DuplicateGroup(format!("group {:?}", group.name())));
        }
        groups.insert(group.name().to_string(), group);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }
}

/// The transport server calls back into the registry through this trait,
/// routing an incoming peer request to the named group's *local* resolution
/// path (`Group::get_locally`) — a request that already crossed the wire to
/// the authoritative peer must never be bounced back out to another peer.
#[async_trait]
impl GroupDirectory for Registry {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, TransportError> {
        let group = self
            .lookup(group)
            .ok_or_else(|| TransportError::GroupNotFound(group.to_string()))?;
        group.get_locally(key).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::FnLoader;

    fn demo_group(name: &str) -> Arc<Group> {
        Arc::new(Group::new(
            name,
            1 << 20,
            Arc::new(FnLoader(|key: String| async move { Ok(key.into_bytes()) })),
        ))
    }

    #[test]
    fn double_registration_is_rejected() {
        let registry = Registry::new();
        registry.register(demo_group("scores")).unwrap();
        let err = registry.register(demo_group("scores")).unwrap_err();
        assert!(matches!(err, Error::DuplicateGroup(_)));
    }

    #[tokio::test]
    async fn directory_routes_to_the_named_group() {
        let registry = Registry::new();
        registry.register(demo_group("scores")).unwrap();
        let value = GroupDirectory::get(&registry, "scores", "jack").await.unwrap();
        assert_eq!(value.copy_out(), b"jack".to_vec());
    }

    #[tokio::test]
    async fn unknown_group_is_group_not_found() {
        let registry = Registry::new();
        let err = GroupDirectory::get(&registry, "missing", "jack").await.unwrap_err();
        assert!(matches!(err, TransportError::GroupNotFound(_)));
    }
}
