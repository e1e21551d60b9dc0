//! Separate-chaining hash set of strings.
//!
//! Chains are index-linked entries in a single node arena rather than boxed
//! lists: `buckets[b]` holds the arena index of the chain head and every node
//! carries the index of its successor. Resizing only relinks indices, and the
//! arena stays dense (removal moves the last node into the freed slot), so the
//! element count is always `nodes.len()`.

use crate::error::SetError;
use crate::set::hash::string_hash;
use std::fmt;
use std::iter::FusedIterator;

/// Bucket count of a freshly created set
pub const DEFAULT_CAPACITY: usize = 5;

/// Maximum ratio of elements to buckets before the table doubles
pub const MAX_LOAD_FACTOR: usize = 4;

/// One chain element
#[derive(Debug, Clone)]
struct Node {
    key: String,
    hash: u32,
    next: Option<usize>,
}

/// A set of strings backed by a separate-chaining hash table.
///
/// Keys are hashed with [`string_hash`] and placed in bucket
/// `hash % capacity`. New keys are prepended to their chain. Once
/// `len / capacity` exceeds [`MAX_LOAD_FACTOR`] the bucket array doubles and
/// every node is relinked using its stored hash.
#[derive(Clone)]
pub struct HashSet {
    buckets: Vec<Option<usize>>,
    nodes: Vec<Node>,
}

/// A key yielded by [`HashSet::iter`], together with its stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub key: &'a str,
    pub hash: u32,
}

impl HashSet {
    /// Create an empty set with [`DEFAULT_CAPACITY`] buckets
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty set with the given bucket count (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: vec![None; capacity.max(1)],
            nodes: Vec::new(),
        }
    }

    /// Number of keys in the set
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current bucket count
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Insert a key. Returns `false` if it was already present.
    pub fn add(&mut self, key: &str) -> bool {
        self.insert_hashed(key, string_hash(key))
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.find(key, string_hash(key)).is_some()
    }

    /// Remove a key, failing with [`SetError::KeyNotFound`] if it is absent
    pub fn remove(&mut self, key: &str) -> Result<(), SetError> {
        let bucket = self.bucket_of(string_hash(key));
        let mut prev: Option<usize> = None;
        let mut cursor = self.buckets[bucket];

        while let Some(idx) = cursor {
            if self.nodes[idx].key == key {
                let next = self.nodes[idx].next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.nodes[p].next = next,
                }
                self.release(idx);
                return Ok(());
            }
            prev = cursor;
            cursor = self.nodes[idx].next;
        }

        Err(SetError::KeyNotFound(key.to_string()))
    }

    /// Iterate over every key, bucket by bucket, newest first within a chain
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            bucket: 0,
            cursor: None,
            remaining: self.len(),
        }
    }

    /// Iterate over keys only
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|entry| entry.key)
    }

    /// Insert using a hash computed earlier (e.g. carried over from another set)
    pub(crate) fn insert_hashed(&mut self, key: &str, hash: u32) -> bool {
        if self.find(key, hash).is_some() {
            return false;
        }

        let bucket = self.bucket_of(hash);
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key: key.to_owned(),
            hash,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(idx);

        if self.nodes.len() > MAX_LOAD_FACTOR * self.buckets.len() {
            self.resize();
        }
        true
    }

    pub(crate) fn contains_hashed(&self, key: &str, hash: u32) -> bool {
        self.find(key, hash).is_some()
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn find(&self, key: &str, hash: u32) -> Option<usize> {
        let mut cursor = self.buckets[self.bucket_of(hash)];
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            if node.hash == hash && node.key == key {
                return Some(idx);
            }
            cursor = node.next;
        }
        None
    }

    /// Double the bucket count and relink every node by its stored hash
    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, vec![None; new_capacity]);

        for head in old_buckets {
            let mut cursor = head;
            while let Some(idx) = cursor {
                cursor = self.nodes[idx].next;
                let bucket = self.nodes[idx].hash as usize % new_capacity;
                self.nodes[idx].next = self.buckets[bucket];
                self.buckets[bucket] = Some(idx);
            }
        }
    }

    /// Free an already-unlinked node, moving the last arena slot into its place
    fn release(&mut self, idx: usize) {
        let last = self.nodes.len() - 1;
        if idx != last {
            let bucket = self.bucket_of(self.nodes[last].hash);
            if self.buckets[bucket] == Some(last) {
                self.buckets[bucket] = Some(idx);
            } else {
                let mut cursor = self.buckets[bucket];
                while let Some(i) = cursor {
                    if self.nodes[i].next == Some(last) {
                        self.nodes[i].next = Some(idx);
                        break;
                    }
                    cursor = self.nodes[i].next;
                }
            }
        }
        self.nodes.swap_remove(idx);
    }

    /// Chain length per bucket, in bucket order
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|&head| {
                let mut len = 0;
                let mut cursor = head;
                while let Some(idx) = cursor {
                    len += 1;
                    cursor = self.nodes[idx].next;
                }
                len
            })
            .collect()
    }
}

impl Default for HashSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Set equality: same keys, regardless of capacity or chain layout
impl PartialEq for HashSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|entry| other.contains_hashed(entry.key, entry.hash))
    }
}

impl Eq for HashSet {}

impl fmt::Debug for HashSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<S: AsRef<str>> FromIterator<S> for HashSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for HashSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key.as_ref());
        }
    }
}

impl<'a> IntoIterator for &'a HashSet {
    type Item = Entry<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the entries of a [`HashSet`]
pub struct Iter<'a> {
    set: &'a HashSet,
    bucket: usize,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Entry<'a>> {
        loop {
            if let Some(idx) = self.cursor {
                let node = &self.set.nodes[idx];
                self.cursor = node.next;
                self.remaining -= 1;
                return Some(Entry {
                    key: &node.key,
                    hash: node.hash,
                });
            }
            if self.bucket >= self.set.buckets.len() {
                return None;
            }
            self.cursor = self.set.buckets[self.bucket];
            self.bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
