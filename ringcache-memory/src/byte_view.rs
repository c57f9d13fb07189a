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

use std::fmt;

/// An immutable, owned byte payload.
///
/// `ByteView` never hands out a reference into its internal buffer: every
/// read is a defensive copy, so a value once cached cannot be mutated by a
/// caller holding onto a previous read. This mirrors the read-through,
/// values-are-immutable-for-the-lifetime-of-a-key contract of the cache as a
/// whole (see the crate-level docs on [`crate::lru`]).
#[derive(Clone, Eq, PartialEq)]
pub struct ByteView {
    bytes: Box<[u8]>,
}

impl ByteView {
    /// Takes ownership of `bytes`. The caller is responsible for cloning
    /// first if it still needs the original buffer — construction never
    /// clones on your behalf, matching the contract that a passed-in buffer
    /// is either already owned or was cloned by the caller.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Number of bytes backing this value. Used verbatim in the LRU's byte
    /// accounting (`len(key) + value.len()`).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns an independent copy of the underlying bytes. Mutating the
    /// returned `Vec` never affects this `ByteView` or any other clone of it.
    pub fn copy_out(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// A lossy textual projection, handy for logging and for origins that
    /// happen to produce UTF-8 values.
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_out_is_independent() {
        let view = ByteView::new(vec![1, 2, 3]);
        let mut copy = view.copy_out();
        copy[0] = 9;
        assert_eq!(view.copy_out(), vec![1, 2, 3]);
        assert_eq!(copy, vec![9, 2, 3]);
    }

    #[test]
    fn len_matches_byte_count() {
        let view = ByteView::from("hello");
        assert_eq!(view.len(), 5);
        assert!(!view.is_empty());
    }

    #[test]
    fn as_str_lossy_roundtrips_utf8() {
        let view = ByteView::from("groupcache");
        assert_eq!(view.as_str_lossy(), "groupcache");
    }
}
