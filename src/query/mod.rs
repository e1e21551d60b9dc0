//! Boolean query evaluation.
//!
//! - [`parser`] - infix to postfix conversion with operand resolution
//! - [`executor`] - postfix evaluation over posting sets
//! - [`batch`] - parallel evaluation of a query file with result files

pub mod batch;
pub mod executor;
pub mod parser;

pub use batch::{QueryHit, QueryOutcome, process_queries, process_query_file};
pub use executor::{QueryExecutor, eval_postfix};
pub use parser::{Operator, PostfixItem, render_postfix, to_postfix};
