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

use clap::Parser;

/// Runs one ringcache node: registers a single demo group and serves the
/// HTTP peer protocol at `--listen`.
///
/// This is process wiring, external to the cache engine core (spec.md §1):
/// it exists so the core's testable properties (spec.md §8) have something
/// concrete to run end to end.
#[derive(Parser, Debug)]
#[command(name = "ringcached", version, about)]
pub struct Args {
    /// This node's own identity, as it should appear to peers,
    /// e.g. `http://127.0.0.1:9999`. Compared against the ring's pick by raw
    /// string equality after normalisation (SPEC_FULL.md, Open Question 3).
    #[arg(long, default_value = "http://127.0.0.1:9999")]
    pub self_addr: String,

    /// Address to bind the HTTP peer server to, e.g. `127.0.0.1:9999`.
    #[arg(long, default_value = "127.0.0.1:9999")]
    pub listen: String,

    /// Other nodes in the cluster, comma-separated, e.g.
    /// `http://127.0.0.1:9998,http://127.0.0.1:9997`.
    #[arg(long, value_delimiter = ',', default_value = "")]
    pub peers: Vec<String>,

    /// Virtual nodes per peer in the consistent-hash ring.
    #[arg(long, default_value_t = ringcache::DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Name of the single demo group this node serves.
    #[arg(long, default_value = "scores")]
    pub group: String,

    /// Byte budget for the group's LRU store, e.g. `2KiB`, `64MB`. `0`
    /// disables eviction entirely.
    #[arg(long, default_value = "2KiB")]
    pub cache_bytes: bytesize::ByteSize,

    /// Gate the demo origin loader behind a Bloom-filter prefilter seeded
    /// with the demo dataset's keys, rejecting unknown keys without a
    /// backend lookup (`middlewares/bloomfilter` in the original source).
    #[arg(long, default_value_t = false)]
    pub enable_prefilter: bool,
}
