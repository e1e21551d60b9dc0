use serde::{Deserialize, Serialize};
use std::fmt;

/// Running counters kept while building an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Non-empty word occurrences processed (not the vocabulary size)
    pub words_indexed: u64,
    /// Corpus files read to completion
    pub files_processed: u64,
    /// Documents fed to the index
    pub documents_processed: u64,
}

/// Lifecycle state of an inverted index.
///
/// An index is mutable while `Building` and read-only once `Frozen`.
/// [`IndexWriter`](crate::index::IndexWriter) is the building side and
/// [`InvertedIndex`](crate::index::InvertedIndex) the frozen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexState {
    Building,
    Frozen,
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexState::Building => write!(f, "building"),
            IndexState::Frozen => write!(f, "frozen"),
        }
    }
}
