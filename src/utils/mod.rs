//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration and app data directory management
//! - [`encoding`] - Variable-length integer encoding (varint)
//! - [`progress`] - Progress bars that vanish without the `progress` feature
//! - [`tokenizer`] - Word extraction for documents and queries
//!
//! ```no_run
//! use boolsearch::utils::extract_words;
//!
//! let words: Vec<&str> = extract_words("Hello, World!! foo_bar").collect();
//! // Returns: ["Hello", "World", "foo", "bar"]
//! ```

pub mod app_data;
pub mod encoding;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use encoding::*;
pub use tokenizer::*;
