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

use std::ptr::NonNull;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::byte_view::ByteView;

struct Node {
    key: String,
    value: ByteView,
    prev: Option<NonNull<Node>>,
    next: Option<NonNull<Node>>,
}

impl Node {
    fn cost(&self) -> usize {
        self.key.len() + self.value.len()
    }
}

/// A byte-budgeted, strictly-ordered LRU map from `String` keys to
/// [`ByteView`] values.
///
/// Internally an intrusive doubly linked list tracks recency (most-recently
/// touched at `head`, eviction victim at `tail`) and a `hashbrown::HashMap`
/// indexes directly to list nodes, giving O(1) `get`/`add`/eviction. This is
/// the same shape the teacher's cache shard uses (an indexer mapping straight
/// to intrusive handles) generalized down to this crate's concrete key/value
/// types instead of foyer's generic `Key`/`Value`/`Indexer` traits.
///
/// `max_bytes == 0` means unbounded: entries are never evicted on size alone.
pub struct LruStore {
    max_bytes: usize,
    used_bytes: usize,
    index: HashMap<String, NonNull<Node>, RandomState>,
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
    on_evict: Option<Box<dyn FnMut(&str, &ByteView) + Send>>,
}

// SAFETY: `LruStore` owns every `Node` it points to exclusively (no aliasing
// across stores) and is always accessed through `&mut self` or behind an
// external mutex (see `SafeCache`), so it is sound to send across threads.
unsafe impl Send for LruStore {}

impl LruStore {
    /// `max_bytes == 0` means unbounded.
    pub fn new(max_bytes: usize) -> Self {
        Self::with_evict_callback(max_bytes, None)
    }

    pub fn with_evict_callback(
        max_bytes: usize,
        on_evict: Option<Box<dyn FnMut(&str, &ByteView) + Send>>,
    ) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            index: HashMap::with_hasher(RandomState::new()),
            head: None,
            tail: None,
            on_evict,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Looks up `key`, moving it to the most-recently-touched end on hit.
    /// Returns a clone of the stored value; never mutates the budget.
    pub fn get(&mut self, key: &str) -> Option<ByteView> {
        let ptr = *self.index.get(key)?;
        self.detach(ptr);
        self.attach_front(ptr);
        // SAFETY: `ptr` came out of `self.index`, which only ever holds
        // pointers to nodes this store owns and has not yet freed.
        Some(unsafe { ptr.as_ref() }.value.clone())
    }

    /// Inserts or replaces `key`, then evicts from the least-recent end
    /// while over budget. Eviction order is strict LRU and deterministic.
    pub fn add(&mut self, key: String, value: ByteView) {
        if let Some(&ptr) = self.index.get(&key) {
            // SAFETY: see `get`.
            let node = unsafe { &mut *ptr.as_ptr() };
            let old_cost = node.cost();
            node.value = value;
            self.used_bytes = self.used_bytes + node.cost() - old_cost;
            self.detach(ptr);
            self.attach_front(ptr);
        } else {
            let cost = key.len() + value.len();
            let node = Box::new(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            let ptr = NonNull::from(Box::leak(node));
            self.index.insert(key, ptr);
            self.attach_front(ptr);
            self.used_bytes += cost;
        }

        while self.max_bytes > 0 && self.used_bytes > self.max_bytes {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    /// Removes and returns the least-recently-touched entry, if any.
    fn evict_oldest(&mut self) -> bool {
        let Some(tail) = self.tail else {
            return false;
        };
        self.detach(tail);
        // SAFETY: `tail` was reachable from `self.index`/the list and has not
        // been freed yet; we are the sole owner and about to drop it.
        let node = unsafe { Box::from_raw(tail.as_ptr()) };
        self.index.remove(&node.key);
        self.used_bytes -= node.key.len() + node.value.len();
        if let Some(cb) = self.on_evict.as_mut() {
            cb(&node.key, &node.value);
        }
        true
    }

    fn detach(&mut self, mut ptr: NonNull<Node>) {
        // SAFETY: `ptr` is a live node owned by this store's list.
        let node = unsafe { ptr.as_mut() };
        match node.prev {
            Some(mut prev) => unsafe { prev.as_mut() }.next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(mut next) => unsafe { next.as_mut() }.prev = node.prev,
            None => self.tail = node.prev,
        }
        node.prev = None;
        node.next = None;
    }

    fn attach_front(&mut self, mut ptr: NonNull<Node>) {
        // SAFETY: `ptr` is a live node owned by this store's list, detached
        // from any previous position by the caller.
        let node = unsafe { ptr.as_mut() };
        node.prev = None;
        node.next = self.head;
        if let Some(mut head) = self.head {
            unsafe { head.as_mut() }.prev = Some(ptr);
        }
        self.head = Some(ptr);
        if self.tail.is_none() {
            self.tail = Some(ptr);
        }
    }
}

impl Drop for LruStore {
    fn drop(&mut self) {
        let mut cur = self.head;
        while let Some(ptr) = cur {
            // SAFETY: every node reachable from `head` was allocated with
            // `Box::leak` by this store and is freed exactly once here.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            cur = node.next;
        }
    }
}
