//! `stats` command output

use crate::index::inverted::InvertedIndex;
use crate::index::snapshot::load_snapshot;
use crate::index::types::{IndexState, IndexStats};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot statistics, printable or serializable as JSON
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub snapshot: PathBuf,
    pub snapshot_bytes: u64,
    pub state: IndexState,
    pub counters: IndexStats,
    pub vocabulary: usize,
    pub total_postings: usize,
    pub top_words: Vec<(String, usize)>,
}

impl StatsReport {
    pub fn from_index(index: &InvertedIndex, snapshot: &Path, snapshot_bytes: u64, top: usize) -> Self {
        Self {
            snapshot: snapshot.to_path_buf(),
            snapshot_bytes,
            state: index.state(),
            counters: *index.stats(),
            vocabulary: index.len(),
            total_postings: index.total_postings(),
            top_words: index
                .top_words(top)
                .into_iter()
                .map(|(word, count)| (word.to_string(), count))
                .collect(),
        }
    }
}

/// Load a snapshot and display its statistics
pub fn show_stats(snapshot_path: &Path, top: usize, json: bool) -> Result<()> {
    let index = load_snapshot(snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let bytes = std::fs::metadata(snapshot_path)?.len();
    let report = StatsReport::from_index(&index, snapshot_path, bytes, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Snapshot:           {}", report.snapshot.display());
    println!("Snapshot size:      {}", format_size(report.snapshot_bytes));
    println!("State:              {}", report.state);
    println!("Files processed:    {}", report.counters.files_processed);
    println!("Documents:          {}", report.counters.documents_processed);
    println!("Words indexed:      {}", report.counters.words_indexed);
    println!("Vocabulary:         {}", report.vocabulary);
    println!("Postings:           {}", report.total_postings);

    if !report.top_words.is_empty() {
        println!();
        println!("Most frequent words:");
        for (word, count) in &report.top_words {
            println!("  {:20} {}", word, count);
        }
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
