//! # boolsearch - Boolean Retrieval Engine
//!
//! Builds a word -> document inverted index over an XML document collection
//! and answers boolean queries (`AND`, `OR`, `AND NOT`) against it.
//!
//! ## Architecture
//!
//! - [`set`] - String hash set with a reproducible polynomial hash and set algebra
//! - [`index`] - Index building, the frozen index, snapshots and statistics
//! - [`query`] - Shunting-yard parsing, postfix evaluation and batch runs
//! - [`corpus`] - Corpus and query file readers
//! - [`output`] - Result files and terminal summaries
//! - [`utils`] - Tokenizer, varints, configuration, progress bars
//! - [`error`] - Typed errors of the core
//!
//! ## Quick Start
//!
//! ```
//! use boolsearch::index::IndexWriter;
//! use boolsearch::query::QueryExecutor;
//!
//! let mut writer = IndexWriter::new();
//! writer.add_text("cat dog", "1");
//! writer.add_text("dog bird", "2");
//! writer.add_text("cat bird", "3");
//! let index = writer.finish();
//!
//! let result = QueryExecutor::new(&index).execute("cat AND NOT bird").unwrap();
//! assert!(result.contains("1"));
//! assert_eq!(result.len(), 1);
//! ```
//!
//! Building is a single sequential pass. [`index::IndexWriter::finish`] freezes
//! the index, after which it is read-only and queries can run in parallel.

pub mod corpus;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod set;
pub mod utils;
