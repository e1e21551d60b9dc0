#![no_main]

use boolsearch::corpus::{parse_documents, parse_queries};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|xml: &str| {
    for document in parse_documents(xml) {
        let _ = document.fields().count();
    }
    let _ = parse_queries(xml);
});
