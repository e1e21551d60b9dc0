use std::iter::FusedIterator;
use std::str::CharIndices;

/// Word characters are Unicode alphanumerics; everything else,
/// underscore included, separates words.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Split text into maximal runs of alphanumeric characters.
///
/// Words keep their case and are borrowed from `text`. A run that reaches the
/// end of the input is yielded as well.
pub fn extract_words(text: &str) -> Words<'_> {
    Words {
        text,
        chars: text.char_indices(),
    }
}

/// Iterator returned by [`extract_words`]
pub struct Words<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = loop {
            let (pos, ch) = self.chars.next()?;
            if is_word_char(ch) {
                break pos;
            }
        };

        let end = loop {
            match self.chars.next() {
                Some((pos, ch)) if !is_word_char(ch) => break pos,
                Some(_) => continue,
                None => break self.text.len(),
            }
        };

        Some(&self.text[start..end])
    }
}

impl FusedIterator for Words<'_> {}

/// Split query text into whitespace-separated tokens
pub fn tokenize_query(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}
