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

use bit_vec::BitVec;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const DEFAULT_FALSE_POSITIVE_RATE: f64 = 1e-4;

/// An approximate-membership prefilter: a false positive is possible (it may
/// say "maybe present" for a key never inserted) but a false negative never
/// is. Grounded on `middlewares/bloomfilter/bloomfilter.go` from the original
/// source, reimplemented with Kirsch–Mitzenmacher double hashing over a
/// `bit-vec::BitVec` instead of hand-seeded `maphash` + a third-party bitset
/// crate.
///
/// spec.md §1 treats an approximate-membership prefilter purely as an
/// external collaborator of the cache core — it sits in front of the origin
/// loader, not inside `Group`/`LruStore`, and the core never calls it
/// directly.
pub struct BloomFilter {
    bits: BitVec,
    num_bits: u64,
    num_hashes: u32,
}

impl BloomFilter {
    /// Sized for `expected_items` entries at the default false-positive rate.
    pub fn new(expected_items: usize) -> Self {
        let num_hashes = (-DEFAULT_FALSE_POSITIVE_RATE.ln() / std::f64::consts::LN_2).ceil() as u32;
        let num_bits = ((expected_items.max(1) as f64) * f64::from(num_hashes) / std::f64::consts::LN_2).ceil() as u64;
        let num_bits = num_bits.max(8);
        Self {
            bits: BitVec::from_elem(num_bits as usize, false),
            num_bits,
            num_hashes: num_hashes.max(1),
        }
    }

    pub fn insert(&mut self, key: &str) {
        let (h1, h2) = Self::base_hashes(key);
        for i in 0..self.num_hashes {
            self.bits.set(self.bit_index(h1, h2, i), true);
        }
    }

    pub fn might_contain(&self, key: &str) -> bool {
        let (h1, h2) = Self::base_hashes(key);
        (0..self.num_hashes).all(|i| self.bits.get(self.bit_index(h1, h2, i)).unwrap_or(false))
    }

    fn bit_index(&self, h1: u64, h2: u64, i: u32) -> usize {
        (h1.wrapping_add(u64::from(i).wrapping_mul(h2)) % self.num_bits) as usize
    }

    fn base_hashes(key: &str) -> (u64, u64) {
        let mut h1 = DefaultHasher::new();
        0u64.hash(&mut h1);
        key.hash(&mut h1);

        let mut h2 = DefaultHasher::new();
        1u64.hash(&mut h2);
        key.hash(&mut h2);

        (h1.finish(), h2.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_keys_are_always_reported_present() {
        let mut filter = BloomFilter::new(16);
        for key in ["jack", "tom", "lucy"] {
            filter.insert(key);
        }
        for key in ["jack", "tom", "lucy"] {
            assert!(filter.might_contain(key));
        }
    }

    #[test]
    fn absent_keys_are_usually_rejected() {
        let mut filter = BloomFilter::new(16);
        for key in ["jack", "tom", "lucy"] {
            filter.insert(key);
        }
        let mut false_positives = 0;
        let trials = 500;
        for i in 0..trials {
            if filter.might_contain(&format!("nobody-{i}")) {
                false_positives += 1;
            }
        }
        // generous bound: the default false-positive rate is 1e-4, so this
        // should essentially never fire, but we leave headroom for a
        // non-cryptographic double-hash scheme.
        assert!(false_positives < trials / 10, "too many false positives: {false_positives}/{trials}");
    }
}
