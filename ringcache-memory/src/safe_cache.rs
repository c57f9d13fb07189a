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

use parking_lot::Mutex;

use crate::byte_view::ByteView;
use crate::lru::LruStore;

/// A thin mutex-guarded facade over [`LruStore`].
///
/// `Get` mutates recency (moving the touched entry to the front of the LRU
/// list), so a reader/writer split would be unsound here: every operation
/// takes the same exclusive lock for its entire body, matching the teacher's
/// shard locking (`parking_lot::Mutex` held across the whole cache op, never
/// across I/O).
///
/// The underlying store is constructed lazily on the first `add`, so a
/// `SafeCache` that is only ever read from never allocates an `LruStore`.
pub struct SafeCache {
    cache_bytes: usize,
    inner: Mutex<Option<LruStore>>,
}

impl SafeCache {
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            inner: Mutex::new(None),
        }
    }

    /// Returns `None` both on a genuine miss and when the store has never
    /// been initialised (i.e. nothing has ever been added).
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.inner.lock();
        guard.as_mut()?.get(key)
    }

    pub fn add(&self, key: String, value: ByteView) {
        let mut guard = self.inner.lock();
        guard
            .get_or_insert_with(|| LruStore::new(self.cache_bytes))
            .add(key, value);
    }

    /// Number of resident entries, or 0 if the store was never initialised.
    pub fn len(&self) -> usize {
        self.inner.lock().as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
