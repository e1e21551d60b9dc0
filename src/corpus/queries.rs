//! Query files: `<top>` elements holding a `<num>` id and a `<query>`.

use crate::corpus::xml::{elements, first_element, text_content};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// One `<top>` entry of a query file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub id: String,
    pub text: String,
}

impl QuerySpec {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Parse every `<top>` element with a `<num>` and a `<query>`
pub fn parse_queries(xml: &str) -> Vec<QuerySpec> {
    let mut queries = Vec::new();

    for (position, top) in elements(xml, "top").enumerate() {
        let id = first_element(top, "num").map(|raw| text_content(raw).trim().to_string());
        let text = first_element(top, "query").map(|raw| text_content(raw).into_owned());

        match (id, text) {
            (Some(id), Some(text)) if !id.is_empty() => queries.push(QuerySpec { id, text }),
            _ => warn!("skipping query #{}: missing <num> or <query>", position + 1),
        }
    }

    queries
}

/// Read and parse a query file
pub fn read_query_file(path: &Path) -> Result<Vec<QuerySpec>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    Ok(parse_queries(&String::from_utf8_lossy(&bytes)))
}
