//! Corpus documents: `<DOC>` elements with a `<DOCID>` and text fields.

use crate::corpus::xml::{elements, first_element, text_content};
use anyhow::{Context, Result};
use log::warn;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// One `<DOC>` of a corpus file with its indexable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub id: String,
    pub titles: Vec<String>,
    pub texts: Vec<String>,
    pub headings: Vec<String>,
}

impl SourceDocument {
    /// Field texts in indexing order: titles, then texts, then headings
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.titles
            .iter()
            .chain(&self.texts)
            .chain(&self.headings)
            .map(String::as_str)
    }
}

/// Parse every `<DOC>` element of a corpus file.
/// Documents without a `<DOCID>` are skipped.
pub fn parse_documents(xml: &str) -> Vec<SourceDocument> {
    let mut documents = Vec::new();

    for (position, doc) in elements(xml, "DOC").enumerate() {
        let Some(id) = first_element(doc, "DOCID").map(|raw| text_content(raw).trim().to_string())
        else {
            warn!("skipping DOC #{} without a DOCID", position + 1);
            continue;
        };

        documents.push(SourceDocument {
            id,
            titles: field_texts(doc, "TITLE"),
            texts: field_texts(doc, "TEXT"),
            headings: field_texts(doc, "HEADING"),
        });
    }

    documents
}

fn field_texts(doc: &str, tag: &str) -> Vec<String> {
    elements(doc, tag)
        .map(|raw| text_content(raw).into_owned())
        .collect()
}

/// Read and parse a corpus file. Invalid UTF-8 is replaced, not rejected.
pub fn read_corpus_file(path: &Path) -> Result<Vec<SourceDocument>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the corpus is read-only input for the duration of the build
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map {}", path.display()))?;
    let text = String::from_utf8_lossy(&mmap);
    Ok(parse_documents(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE FILE SYSTEM "docs.dtd">
<FILE>
<DOC>
<DOCID> FT911-1 </DOCID>
<TITLE>Markets &amp; money</TITLE>
<TEXT>
<P>Shares rose.</P>
</TEXT>
<TEXT>Second text</TEXT>
<HEADING>Business</HEADING>
</DOC>
<DOC>
<TEXT>orphan text</TEXT>
</DOC>
<DOC>
<DOCID>FT911-2</DOCID>
</DOC>
</FILE>
"#;

    #[test]
    fn test_parse_documents() {
        let docs = parse_documents(SAMPLE);
        assert_eq!(docs.len(), 2);

        let first = &docs[0];
        assert_eq!(first.id, "FT911-1");
        assert_eq!(first.titles, vec!["Markets & money"]);
        assert_eq!(first.texts.len(), 2);
        assert!(first.texts[0].contains("Shares rose."));
        assert_eq!(first.headings, vec!["Business"]);

        let second = &docs[1];
        assert_eq!(second.id, "FT911-2");
        assert_eq!(second.fields().count(), 0);
    }

    #[test]
    fn test_fields_order() {
        let doc = SourceDocument {
            id: "d".into(),
            titles: vec!["t".into()],
            texts: vec!["x".into(), "y".into()],
            headings: vec!["h".into()],
        };
        assert_eq!(doc.fields().collect::<Vec<_>>(), vec!["t", "x", "y", "h"]);
    }

    #[test]
    fn test_commented_documents_and_unknown_entities() {
        let xml = "<FILE><!-- <DOC><DOCID>ghost</DOCID></DOC> --><DOC><DOCID>1</DOCID>\
                   <TEXT>oil&hyph;rich &pound;5</TEXT></DOC></FILE>";
        let docs = parse_documents(xml);
        let ids: Vec<&str> = docs.iter().map(|doc| doc.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        let mut writer = crate::index::IndexWriter::new();
        writer.add_document(&docs[0].id, docs[0].fields());
        let index = writer.finish();
        let mut vocabulary: Vec<&str> = index.vocabulary().collect();
        vocabulary.sort_unstable();
        assert_eq!(vocabulary, vec!["5", "oil", "rich"]);
    }

    #[test]
    fn test_read_corpus_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ft911.xml");
        std::fs::write(&path, SAMPLE).unwrap();
        let empty = dir.path().join("empty.xml");
        std::fs::write(&empty, "").unwrap();

        assert_eq!(read_corpus_file(&path).unwrap().len(), 2);
        assert!(read_corpus_file(&empty).unwrap().is_empty());
        assert!(read_corpus_file(&dir.path().join("missing.xml")).is_err());
    }
}
