use thiserror::Error;

/// Errors raised by [`HashSet`](crate::set::HashSet) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error("{0} was not present in the hash set")]
    KeyNotFound(String),
}

/// Errors raised while evaluating a boolean query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// An operator token with no evaluation rule (a bare `NOT`)
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// An operator was reached with fewer than two operands on the stack,
    /// or the query produced no value at all
    #[error("stack underflow at {0}")]
    StackUnderflow(String),

    /// More than one value was left on the stack after evaluation
    #[error("malformed query: {0} operands left without an operator")]
    DanglingOperands(usize),
}

/// Errors raised while saving or restoring an index snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an index snapshot (bad magic bytes)")]
    BadMagic,

    #[error("unsupported snapshot version {actual}, expected <= {expected}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("snapshot data ended unexpectedly while reading {0}")]
    Truncated(&'static str),

    #[error("snapshot contains invalid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl QueryError {
    /// Whether the query text itself is malformed, as opposed to using an
    /// operator the evaluator does not implement
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            QueryError::StackUnderflow(_) | QueryError::DanglingOperands(_)
        )
    }
}
