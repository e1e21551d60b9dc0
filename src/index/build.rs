//! Building an index from a directory of corpus files

use crate::corpus::{discover_corpus_files, read_corpus_file};
use crate::index::inverted::InvertedIndex;
use crate::index::types::IndexStats;
use crate::index::writer::IndexWriter;
use crate::utils::progress;
use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Summary of one build pass
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub stats: IndexStats,
    pub vocabulary: usize,
    /// Corpus files that could not be read
    pub failed_files: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Build the index from every corpus file in `corpus_dir`.
///
/// Files are processed one at a time, in path order. A file that cannot be
/// read is logged and skipped.
pub fn build_index(corpus_dir: &Path, silent: bool) -> Result<(InvertedIndex, BuildReport)> {
    let start = Instant::now();

    let discover = progress::spinner("Discovering corpus files...", silent);
    let files = discover_corpus_files(corpus_dir)?;
    if let Some(spinner) = discover {
        spinner.finish_with_message(format!("Found {} corpus files", files.len()));
    }
    info!("Indexing {} files from {}", files.len(), corpus_dir.display());

    let pb = progress::bar(files.len() as u64, silent);
    let mut writer = IndexWriter::new();
    let mut failed_files = Vec::new();

    for path in &files {
        match read_corpus_file(path) {
            Ok(documents) => {
                debug!("{}: {} documents", path.display(), documents.len());
                for document in &documents {
                    writer.add_document(&document.id, document.fields());
                }
                writer.record_file();
            }
            Err(err) => {
                warn!("Skipping {}: {:#}", path.display(), err);
                failed_files.push(path.clone());
            }
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let vocabulary = writer.vocabulary_len();
    let index = writer.finish();
    let report = BuildReport {
        stats: *index.stats(),
        vocabulary,
        failed_files,
        elapsed: start.elapsed(),
    };

    info!(
        "Indexed {} documents from {} files: {} words, {} distinct, in {:.2?}",
        report.stats.documents_processed,
        report.stats.files_processed,
        report.stats.words_indexed,
        report.vocabulary,
        report.elapsed
    );

    Ok((index, report))
}
