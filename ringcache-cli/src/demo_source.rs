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

use async_trait::async_trait;
use ringcache::Loader;

use crate::prefilter::BloomFilter;

/// The demo backing store from spec.md §8's end-to-end scenarios
/// (`{jack -> "256", tom -> "34385", lucy -> "125"}`), standing in for the
/// original's slow-DB closure in `main.go`. A real deployment would replace
/// this with an adapter over whatever system of record the embedder owns
/// (e.g. `database/mysql` in the original source) — spec.md §1 treats that
/// adapter as an external collaborator, not part of the core.
pub struct DemoOrigin {
    data: HashMap<&'static str, &'static str>,
    prefilter: Option<BloomFilter>,
}

impl DemoOrigin {
    pub fn new(enable_prefilter: bool) -> Self {
        let data = HashMap::from([("jack", "256"), ("tom", "34385"), ("lucy", "125")]);
        let prefilter = enable_prefilter.then(|| {
            let mut filter = BloomFilter::new(data.len());
            for key in data.keys() {
                filter.insert(key);
            }
            filter
        });
        Self { data, prefilter }
    }
}

#[async_trait]
impl Loader for DemoOrigin {
    async fn load(&self, key: &str) -> Result<Vec<u8>, String> {
        if let Some(filter) = &self.prefilter {
            if !filter.might_contain(key) {
                tracing::debug!(%key, "prefilter rejected key without a backend lookup");
                return Err(format!("{key} not exist"));
            }
        }
        tracing::info!(%key, "[SlowDB] search key");
        self.data
            .get(key)
            .map(|value| value.as_bytes().to_vec())
            .ok_or_else(|| format!("{key} not exist"))
    }
}
