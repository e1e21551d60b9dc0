#![no_main]

use arbitrary::Arbitrary;
use boolsearch::index::IndexWriter;
use boolsearch::query::QueryExecutor;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    documents: Vec<(String, String)>,
    query: String,
}

fuzz_target!(|input: Input| {
    let mut writer = IndexWriter::new();
    for (id, text) in &input.documents {
        writer.add_text(text, id);
    }
    let index = writer.finish();

    // Errors are fine, panics are not. A result only holds indexed ids.
    if let Ok(result) = QueryExecutor::new(&index).execute(&input.query) {
        for id in result.keys() {
            assert!(input.documents.iter().any(|(doc, _)| doc == id));
        }
    }
});
