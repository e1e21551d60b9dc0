#![no_main]

use boolsearch::utils::{extract_words, is_word_char};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let mut total = 0;
    for word in extract_words(text) {
        assert!(!word.is_empty());
        assert!(word.chars().all(is_word_char));
        total += word.len();
    }
    assert!(total <= text.len());
});
