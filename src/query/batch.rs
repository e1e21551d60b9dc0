//! Batch evaluation of a query file.
//!
//! Queries run in parallel on a rayon pool and each one writes its own
//! result file, so a failing query never stops the batch.

use crate::corpus::{QuerySpec, read_query_file};
use crate::error::QueryError;
use crate::index::InvertedIndex;
use crate::output::write_result;
use crate::query::executor::QueryExecutor;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A successfully evaluated and written query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    /// Number of matching documents
    pub documents: usize,
    /// Result file
    pub path: PathBuf,
}

/// Result of one query in a batch
#[derive(Debug)]
pub struct QueryOutcome {
    pub query_id: String,
    pub result: Result<QueryHit>,
}

impl QueryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Whether the query failed because its text does not form a valid
    /// expression
    pub fn is_malformed(&self) -> bool {
        self.result.as_ref().is_err_and(|err| {
            err.downcast_ref::<QueryError>()
                .is_some_and(QueryError::is_malformed)
        })
    }
}

/// Evaluate every query against the index and write one result file per query.
///
/// `threads` sizes the worker pool (0 = one per CPU). Failing queries are
/// logged and reported in their outcome; the rest of the batch still runs.
/// Outcomes are returned in input order.
pub fn process_queries(
    index: &InvertedIndex,
    queries: &[QuerySpec],
    results_dir: &Path,
    threads: usize,
) -> Result<Vec<QueryOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build query thread pool")?;

    info!(
        "Evaluating {} queries on {} threads",
        queries.len(),
        pool.current_num_threads()
    );

    let executor = QueryExecutor::new(index);
    let outcomes: Vec<QueryOutcome> = pool.install(|| {
        queries
            .par_iter()
            .map(|query| {
                let outcome = QueryOutcome {
                    query_id: query.id.clone(),
                    result: run_query(&executor, query, results_dir),
                };
                match &outcome.result {
                    Ok(hit) => debug!("Query {}: {} documents", query.id, hit.documents),
                    Err(err) if outcome.is_malformed() => {
                        warn!("Skipping malformed query {}: {:#}", query.id, err)
                    }
                    Err(err) => warn!("Skipping query {}: {:#}", query.id, err),
                }
                outcome
            })
            .collect()
    });

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        "Processed {} queries ({} failed), results in {}",
        outcomes.len(),
        failed,
        results_dir.display()
    );
    Ok(outcomes)
}

fn run_query(executor: &QueryExecutor<'_>, query: &QuerySpec, results_dir: &Path) -> Result<QueryHit> {
    let documents = executor
        .execute(&query.text)
        .with_context(|| format!("Failed to evaluate {:?}", query.text))?;
    let path = write_result(results_dir, &query.id, &documents)
        .with_context(|| format!("Failed to write result for query {}", query.id))?;
    Ok(QueryHit {
        documents: documents.len(),
        path,
    })
}

/// Read a query file and run it as a batch
pub fn process_query_file(
    index: &InvertedIndex,
    queries_path: &Path,
    results_dir: &Path,
    threads: usize,
) -> Result<Vec<QueryOutcome>> {
    let queries = read_query_file(queries_path)?;
    if queries.is_empty() {
        warn!("No queries found in {}", queries_path.display());
    }
    process_queries(index, &queries, results_dir, threads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexWriter;
    use std::fs;
    use tempfile::tempdir;

    fn sample_index() -> InvertedIndex {
        let mut writer = IndexWriter::new();
        writer.add_text("cat dog", "1");
        writer.add_text("dog bird", "2");
        writer.add_text("cat bird", "3");
        writer.finish()
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        let index = sample_index();
        let queries = vec![
            QuerySpec::new("1", "cat AND dog"),
            QuerySpec::new("2", "NOT cat"),
            QuerySpec::new("3", "cat OR bird"),
        ];

        let outcomes = process_queries(&index, &queries, dir, 2).unwrap();
        let ids: Vec<&str> = outcomes.iter().map(|o| o.query_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        assert_eq!(outcomes[0].result.as_ref().unwrap().documents, 1);
        assert_eq!(outcomes[2].result.as_ref().unwrap().documents, 3);

        let err = outcomes[1].result.as_ref().unwrap_err();
        assert_eq!(
            err.downcast_ref::<QueryError>(),
            Some(&QueryError::UnsupportedOperator("NOT".to_string()))
        );
        assert!(!outcomes[1].is_malformed());

        assert_eq!(fs::read_to_string(dir.join("1")).unwrap(), "1\n");
        assert!(!dir.join("2").exists());
        assert_eq!(fs::read_to_string(dir.join("3")).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_malformed_queries_are_flagged() {
        let temp = tempdir().unwrap();
        let index = sample_index();
        let queries = vec![
            QuerySpec::new("dangling", "cat dog"),
            QuerySpec::new("underflow", "cat AND"),
            QuerySpec::new("fine", "cat"),
        ];

        let outcomes = process_queries(&index, &queries, temp.path(), 1).unwrap();
        assert!(outcomes[0].is_malformed());
        assert!(outcomes[1].is_malformed());
        assert!(outcomes[2].is_ok() && !outcomes[2].is_malformed());
        assert!(!temp.path().join("dangling").exists());
        assert!(!temp.path().join("underflow").exists());
    }

    #[test]
    fn test_sequential_pool() {
        let dir = tempdir().unwrap();
        let index = sample_index();
        let queries = vec![QuerySpec::new("only", "dog AND NOT cat")];

        let outcomes = process_queries(&index, &queries, dir.path(), 1).unwrap();
        assert!(outcomes[0].is_ok());
        assert_eq!(fs::read_to_string(dir.path().join("only")).unwrap(), "2\n");
    }

    #[test]
    fn test_process_query_file() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        let queries_path = dir.join("queries.xml");
        fs::write(
            &queries_path,
            "<topics><top><num>q1</num><query>bird</query></top></topics>",
        )
        .unwrap();

        let index = sample_index();
        let outcomes = process_query_file(&index, &queries_path, &dir.join("bin"), 0).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].result.as_ref().unwrap().documents, 2);
    }
}
