//! Index construction. An [`IndexWriter`] accepts documents until
//! [`IndexWriter::finish`] freezes it into an [`InvertedIndex`].

use crate::index::inverted::InvertedIndex;
use crate::index::types::{IndexState, IndexStats};
use crate::set::HashSet;
use crate::utils::extract_words;
use rustc_hash::FxHashMap;

/// Index writer: the mutable, building side of an inverted index.
///
/// Populated by a single sequential pass, then turned into a read-only
/// [`InvertedIndex`] with [`IndexWriter::finish`].
#[derive(Debug, Default)]
pub struct IndexWriter {
    /// Word -> posting set of document ids
    words: FxHashMap<String, HashSet>,
    stats: IndexStats,
}

impl IndexWriter {
    /// Create an empty index writer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> IndexState {
        IndexState::Building
    }

    /// Record that `word` occurs in `doc_id`. Empty words are ignored.
    pub fn add_word(&mut self, word: &str, doc_id: &str) {
        if word.is_empty() {
            return;
        }

        match self.words.get_mut(word) {
            Some(postings) => {
                postings.add(doc_id);
            }
            None => {
                let mut postings = HashSet::new();
                postings.add(doc_id);
                self.words.insert(word.to_owned(), postings);
            }
        }

        self.stats.words_indexed += 1;
    }

    /// Index every alphanumeric word of `text` against `doc_id`
    pub fn add_text(&mut self, text: &str, doc_id: &str) {
        for word in extract_words(text) {
            self.add_word(word.trim(), doc_id);
        }
    }

    /// Index all text fields of one document
    pub fn add_document<'f, I>(&mut self, doc_id: &str, fields: I)
    where
        I: IntoIterator<Item = &'f str>,
    {
        for field in fields {
            self.add_text(field, doc_id);
        }
        self.stats.documents_processed += 1;
    }

    /// Count a corpus file as fully processed
    pub fn record_file(&mut self) {
        self.stats.files_processed += 1;
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Number of distinct words seen so far
    pub fn vocabulary_len(&self) -> usize {
        self.words.len()
    }

    /// Freeze the index for querying
    pub fn finish(self) -> InvertedIndex {
        InvertedIndex::from_parts(self.words, self.stats)
    }
}
