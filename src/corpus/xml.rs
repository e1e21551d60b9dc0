//! Minimal, recovering XML element scanner.
//!
//! Only what the corpus and query files need: find the top-level occurrences
//! of a tag and turn element content into plain text. Nested elements with the
//! same tag name are not supported.

use memchr::memmem;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid CDATA regex"));

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<![^>]*>|<\?.*?\?>|<[^>]*>").expect("valid markup regex")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z_][A-Za-z0-9._-]*);").expect("valid entity regex")
});

/// Iterate over the raw inner content of every `<tag>...</tag>` element
pub fn elements<'a>(xml: &'a str, tag: &str) -> Elements<'a> {
    Elements {
        xml,
        pos: 0,
        open: format!("<{}", tag).into_bytes(),
        close: format!("</{}>", tag).into_bytes(),
    }
}

/// Iterator returned by [`elements`]
pub struct Elements<'a> {
    xml: &'a str,
    pos: usize,
    open: Vec<u8>,
    close: Vec<u8>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.xml.as_bytes();
        loop {
            let start = find_markup(bytes, self.pos, &self.open)?;
            let after_name = start + self.open.len();

            // `<DOC` must not match `<DOCID>`
            match bytes.get(after_name) {
                Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n') => {}
                _ => {
                    self.pos = after_name;
                    continue;
                }
            }

            let tag_end = after_name + memchr::memchr(b'>', &bytes[after_name..])?;
            if bytes[tag_end - 1] == b'/' {
                self.pos = tag_end + 1;
                return Some("");
            }

            let content_start = tag_end + 1;
            return match find_markup(bytes, content_start, &self.close) {
                Some(content_end) => {
                    self.pos = content_end + self.close.len();
                    Some(&self.xml[content_start..content_end])
                }
                None => {
                    // Unclosed element: take the rest of the input
                    self.pos = bytes.len();
                    Some(&self.xml[content_start..])
                }
            };
        }
    }
}

/// Offset of the next `needle` at or after `from`, skipping comments and
/// CDATA sections. An unterminated comment or CDATA section runs to the end.
fn find_markup(bytes: &[u8], mut from: usize, needle: &[u8]) -> Option<usize> {
    loop {
        let at = from + memchr::memchr(b'<', &bytes[from..])?;
        let rest = &bytes[at..];
        from = if let Some(body) = rest.strip_prefix(b"<!--") {
            at + 4 + memmem::find(body, b"-->")? + 3
        } else if let Some(body) = rest.strip_prefix(b"<![CDATA[") {
            at + 9 + memmem::find(body, b"]]>")? + 3
        } else if rest.starts_with(needle) {
            return Some(at);
        } else {
            at + 1
        };
    }
}

/// First `<tag>` element's raw content
pub fn first_element<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    elements(xml, tag).next()
}

/// Plain text of element content: markup stripped, entities decoded,
/// CDATA sections kept verbatim.
///
/// Entities other than the five predefined ones and character references
/// are not resolved; each becomes a word separator.
pub fn text_content(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['<', '&']) {
        return Cow::Borrowed(raw);
    }

    let mut text = String::with_capacity(raw.len());
    let mut last = 0;
    for caps in CDATA.captures_iter(raw) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_markup_text(&mut text, &raw[last..whole.start()]);
        text.push_str(inner.as_str());
        last = whole.end();
    }
    push_markup_text(&mut text, &raw[last..]);
    Cow::Owned(text)
}

fn push_markup_text(out: &mut String, segment: &str) {
    let stripped = MARKUP.replace_all(segment, " ");
    let decoded = ENTITY.replace_all(&stripped, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| " ".to_string(), String::from)
    });
    out.push_str(&decoded);
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
