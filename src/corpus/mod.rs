//! Corpus and query file ingestion.
//!
//! Turns XML collection files into plain `(document id, field text)` and
//! `(query id, query text)` pairs for the index and the query evaluator.

pub mod document;
pub mod queries;
pub mod xml;

pub use document::{SourceDocument, parse_documents, read_corpus_file};
pub use queries::{QuerySpec, parse_queries, read_query_file};

use anyhow::{Context, Result};
use globset::Glob;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// List the `*.xml` files directly inside a corpus directory, sorted by path
pub fn discover_corpus_files(corpus_dir: &Path) -> Result<Vec<PathBuf>> {
    if !corpus_dir.is_dir() {
        anyhow::bail!("Corpus directory not found: {}", corpus_dir.display());
    }

    let matcher = Glob::new("*.xml")
        .context("Invalid corpus glob")?
        .compile_matcher();

    let walker = WalkBuilder::new(corpus_dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}
