pub mod build;
pub mod inverted;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::{BuildReport, build_index};
pub use inverted::InvertedIndex;
pub use snapshot::{load_snapshot, save_snapshot};
pub use types::*;
pub use writer::IndexWriter;
