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

//! The in-process building blocks of a ringcache node: an immutable byte
//! payload, a byte-budgeted LRU store, a mutex-guarded safe facade over it,
//! and a single-flight primitive for collapsing concurrent duplicate work.
//!
//! Networking, consistent hashing and the group lookup state machine live in
//! the `ringcache-transport` and `ringcache` crates, which depend on this one.

mod byte_view;
mod lru;
mod safe_cache;
mod single_flight;

pub use byte_view::ByteView;
pub use lru::LruStore;
pub use safe_cache::SafeCache;
pub use single_flight::{FlightLost, SingleFlight};
