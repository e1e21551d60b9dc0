//! End-to-end tests: corpus files on disk -> index -> query batch -> result files.
//!
//! Covers both the library pipeline and the `boolsearch` binary.

use boolsearch::corpus::read_query_file;
use boolsearch::index::{build_index, load_snapshot, save_snapshot};
use boolsearch::query::{QueryExecutor, process_queries};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const CORPUS_A: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE FILE SYSTEM "documents.dtd">
<FILE>
<DOC>
<DOCID>1</DOCID>
<TITLE>cat</TITLE>
<TEXT><P>dog</P></TEXT>
</DOC>
<DOC>
<DOCID>2</DOCID>
<TEXT>dog, bird!</TEXT>
</DOC>
</FILE>
"#;

const CORPUS_B: &str = r#"<FILE>
<DOC>
<DOCID>3</DOCID>
<HEADING>cat &amp; bird</HEADING>
</DOC>
<DOC>
<TEXT>no id, never indexed: unicorn</TEXT>
</DOC>
</FILE>
"#;

const QUERIES: &str = r#"<topics>
<top><num>101</num><query>cat AND dog</query></top>
<top><num>102</num><query>cat OR bird</query></top>
<top><num>103</num><query>cat AND NOT bird</query></top>
<top><num>104</num><query>unicorn AND cat</query></top>
<top><num>105</num><query>NOT cat</query></top>
</topics>
"#;

/// Data directory laid out like the default configuration:
/// `documents_cs/*.xml` and `queries_cs.xml`
fn create_fixture() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let corpus = dir.path().join("documents_cs");
    fs::create_dir_all(&corpus).unwrap();
    fs::write(corpus.join("a.xml"), CORPUS_A).unwrap();
    fs::write(corpus.join("b.xml"), CORPUS_B).unwrap();
    fs::write(corpus.join("documents.dtd"), "<!ELEMENT FILE (DOC*)>").unwrap();
    fs::write(dir.path().join("queries_cs.xml"), QUERIES).unwrap();
    dir
}

fn read_ids(path: &Path) -> BTreeSet<String> {
    fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("Failed to read {}: {}", path.display(), err))
        .lines()
        .map(str::to_string)
        .collect()
}

fn ids(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn library_pipeline() {
    let fixture = create_fixture();
    let data = fixture.path();

    let (index, report) = build_index(&data.join("documents_cs"), true).unwrap();
    assert_eq!(report.stats.files_processed, 2);
    assert_eq!(report.stats.documents_processed, 3);
    assert!(!index.contains("unicorn"));

    let queries = read_query_file(&data.join("queries_cs.xml")).unwrap();
    assert_eq!(queries.len(), 5);

    let results = data.join("bin");
    let outcomes = process_queries(&index, &queries, &results, 2).unwrap();
    assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 4);

    assert_eq!(read_ids(&results.join("101")), ids(&["1"]));
    assert_eq!(read_ids(&results.join("102")), ids(&["1", "2", "3"]));
    assert_eq!(read_ids(&results.join("103")), ids(&["1"]));
    assert!(read_ids(&results.join("104")).is_empty());
    assert!(!results.join("105").exists());
}

#[test]
fn snapshot_round_trip_answers_the_same() {
    let fixture = create_fixture();
    let (index, _) = build_index(&fixture.path().join("documents_cs"), true).unwrap();

    let snapshot = fixture.path().join("state").join("index.snap");
    save_snapshot(&index, &snapshot).unwrap();
    let restored = load_snapshot(&snapshot).unwrap();

    assert_eq!(restored.stats(), index.stats());
    for query in ["cat AND dog", "cat OR bird", "dog AND NOT cat", "bird"] {
        let before = QueryExecutor::new(&index).execute(query).unwrap();
        let after = QueryExecutor::new(&restored).execute(query).unwrap();
        assert_eq!(before, after, "query {:?}", query);
    }
}

/// Path to the built binary
fn boolsearch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_boolsearch"))
}

/// Run the binary against a fixture with an isolated config and snapshot
fn run_boolsearch(fixture: &Path, args: &[&str]) -> (String, String, bool) {
    let config = fixture.join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let output = Command::new(boolsearch_binary())
        .arg("--config")
        .arg(&config)
        .arg("--data-path")
        .arg(fixture)
        .arg("--results-dir")
        .arg(fixture.join("bin"))
        .arg("--snapshot")
        .arg(fixture.join("index.snap"))
        .args(["--quiet", "--no-color"])
        .args(args)
        .output()
        .expect("Failed to run boolsearch");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn binary_run_writes_result_files() {
    let fixture = create_fixture();
    let (stdout, stderr, ok) = run_boolsearch(fixture.path(), &["run", "--save"]);
    assert!(ok, "run failed: {}", stderr);

    assert!(stdout.contains("5 queries, 4 succeeded, 1 failed"), "stdout: {}", stdout);
    assert!(stdout.contains("unsupported operator: NOT"), "stdout: {}", stdout);
    assert_eq!(read_ids(&fixture.path().join("bin").join("102")), ids(&["1", "2", "3"]));
    assert!(fixture.path().join("index.snap").exists());
}

#[test]
fn binary_search_uses_saved_snapshot() {
    let fixture = create_fixture();
    let (_, stderr, ok) = run_boolsearch(fixture.path(), &["index", "--save"]);
    assert!(ok, "index failed: {}", stderr);

    // Removing the corpus proves the search is served from the snapshot
    fs::remove_dir_all(fixture.path().join("documents_cs")).unwrap();

    let (stdout, stderr, ok) = run_boolsearch(fixture.path(), &["search", "cat", "AND", "NOT", "bird"]);
    assert!(ok, "search failed: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1", "1 documents"]);

    let (stdout, _, ok) = run_boolsearch(fixture.path(), &["stats", "--json"]);
    assert!(ok);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["counters"]["documents_processed"], 3);
    assert_eq!(stats["vocabulary"], 3);
}

#[test]
fn binary_search_reports_unsupported_operator() {
    let fixture = create_fixture();
    let (_, stderr, ok) = run_boolsearch(fixture.path(), &["search", "--rebuild", "NOT", "cat"]);
    assert!(!ok);
    assert!(stderr.contains("unsupported operator: NOT"), "stderr: {}", stderr);
}

#[test]
fn binary_query_without_snapshot_fails() {
    let fixture = create_fixture();
    let (_, stderr, ok) = run_boolsearch(fixture.path(), &["query"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to load snapshot"), "stderr: {}", stderr);
}
