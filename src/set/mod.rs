//! String set with a reproducible hash and chained buckets.
//!
//! - [`hash`] - the polynomial string hash
//! - [`hashset`] - the separate-chaining [`HashSet`]
//! - [`algebra`] - union, intersection and difference

pub mod algebra;
pub mod hash;
pub mod hashset;

pub use hash::string_hash;
pub use hashset::{DEFAULT_CAPACITY, Entry, HashSet, Iter, MAX_LOAD_FACTOR};
