//! Frozen word -> document-id index, safe to share across query threads.

use crate::index::types::{IndexState, IndexStats};
use crate::set::HashSet;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Frozen word -> document-set index.
///
/// Only exposes `&self` operations, so a built index can be shared across
/// query workers without locking.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    words: FxHashMap<String, HashSet>,
    stats: IndexStats,
}

impl InvertedIndex {
    pub(crate) fn from_parts(words: FxHashMap<String, HashSet>, stats: IndexStats) -> Self {
        Self { words, stats }
    }

    pub fn state(&self) -> IndexState {
        IndexState::Frozen
    }

    /// Posting set of a word, if it was ever indexed
    pub fn lookup(&self, word: &str) -> Option<&HashSet> {
        self.words.get(word)
    }

    /// Posting set of a word, borrowed from the index. Unindexed words
    /// resolve to an empty set.
    pub fn get(&self, word: &str) -> Cow<'_, HashSet> {
        match self.words.get(word) {
            Some(postings) => Cow::Borrowed(postings),
            None => Cow::Owned(HashSet::new()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// All indexed words, in no particular order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.keys().map(String::as_str)
    }

    /// Words with their posting sets
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet)> + '_ {
        self.words.iter().map(|(word, postings)| (word.as_str(), postings))
    }

    /// Vocabulary size
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Sum of posting set sizes over all words
    pub fn total_postings(&self) -> usize {
        self.words.values().map(HashSet::len).sum()
    }

    /// The `n` words with the largest posting sets, ties broken alphabetically
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .iter()
            .map(|(word, postings)| (word, postings.len()))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }
}
