//! Set algebra over [`HashSet`]: union, intersection and difference.
//!
//! Entries carry their stored hash from one set to another, so none of these
//! operations rehash a key.

use crate::set::hashset::HashSet;

impl HashSet {
    /// Keys present in either set.
    ///
    /// Consumes both inputs and returns the larger one after inserting the
    /// smaller one's keys into it, so only the smaller side is copied.
    pub fn union(self, other: HashSet) -> HashSet {
        let (mut larger, smaller) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        larger.union_with(&smaller);
        larger
    }

    /// Insert every key of `other` into `self`
    pub fn union_with(&mut self, other: &HashSet) {
        for entry in other {
            self.insert_hashed(entry.key, entry.hash);
        }
    }

    /// Keys present in both sets, as a new set
    pub fn intersection(&self, other: &HashSet) -> HashSet {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut result = HashSet::new();
        for entry in smaller {
            if larger.contains_hashed(entry.key, entry.hash) {
                result.insert_hashed(entry.key, entry.hash);
            }
        }
        result
    }

    /// Keys of `self` absent from `other`, as a new set
    pub fn and_not(&self, other: &HashSet) -> HashSet {
        let mut result = HashSet::new();
        for entry in self {
            if !other.contains_hashed(entry.key, entry.hash) {
                result.insert_hashed(entry.key, entry.hash);
            }
        }
        result
    }
}
