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

/// Canonicalises a peer/self identity string so operators supplying
/// `http://host:9999` vs `http://host:9999/` (or a bare `host:9999`) do not
/// silently defeat the ring's self-vs-peer string comparison (spec.md §9,
/// SPEC_FULL.md supplemented feature).
///
/// This is CLI-level config hygiene, not a change to the core: `Group` and
/// `HashRing`/`RingPeerPicker` still compare raw strings exactly as
/// spec.md §4.6/§9 describe.
pub fn normalize(identity: &str) -> String {
    let trimmed = identity.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
