//! Postfix evaluation of boolean queries.
//!
//! Operands borrow posting sets from the index, and operators never modify a
//! borrowed set.

use crate::error::QueryError;
use crate::index::InvertedIndex;
use crate::query::parser::{Operator, PostfixItem, render_postfix, to_postfix};
use crate::set::HashSet;
use crate::utils::tokenize_query;
use log::debug;
use std::borrow::Cow;

/// Evaluates boolean queries against a frozen index
pub struct QueryExecutor<'a> {
    index: &'a InvertedIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Evaluate a query and return the matching document ids
    pub fn execute(&self, query: &str) -> Result<HashSet, QueryError> {
        let tokens = tokenize_query(query);
        let postfix = to_postfix(&tokens, self.index);
        debug!("Query in postfix: {}", render_postfix(&postfix));
        eval_postfix(postfix)
    }
}

/// Run a postfix sequence on a value stack.
///
/// Each binary operator pops its right operand first, then its left.
/// Exactly one value must remain at the end.
pub fn eval_postfix(items: Vec<PostfixItem<'_>>) -> Result<HashSet, QueryError> {
    let mut stack: Vec<Cow<'_, HashSet>> = Vec::new();

    for item in items {
        let op = match item {
            PostfixItem::Operand { set, .. } => {
                stack.push(set);
                continue;
            }
            PostfixItem::Operator(op) => op,
        };

        // Reject before popping so a bare NOT is not reported as underflow
        if op == Operator::Not {
            return Err(unsupported(op));
        }

        let underflow = || QueryError::StackUnderflow(op.symbol().to_string());
        let right = stack.pop().ok_or_else(underflow)?;
        let left = stack.pop().ok_or_else(underflow)?;
        stack.push(Cow::Owned(apply(op, left, right)?));
    }

    match stack.len() {
        0 => Err(QueryError::StackUnderflow("end of query".to_string())),
        1 => Ok(stack.pop().map(Cow::into_owned).unwrap_or_default()),
        n => Err(QueryError::DanglingOperands(n)),
    }
}

fn apply(op: Operator, left: Cow<'_, HashSet>, right: Cow<'_, HashSet>) -> Result<HashSet, QueryError> {
    match op {
        Operator::And => Ok(left.intersection(&right)),
        Operator::AndNot => Ok(left.and_not(&right)),
        Operator::Or => Ok(union_operands(left, right)),
        Operator::Not => Err(unsupported(op)),
    }
}

fn unsupported(op: Operator) -> QueryError {
    QueryError::UnsupportedOperator(op.symbol().to_string())
}

/// Union that reuses an owned operand's storage and never touches a set
/// borrowed from the index
fn union_operands(left: Cow<'_, HashSet>, right: Cow<'_, HashSet>) -> HashSet {
    match (left, right) {
        (Cow::Owned(left), Cow::Owned(right)) => left.union(right),
        (Cow::Owned(mut owned), Cow::Borrowed(borrowed))
        | (Cow::Borrowed(borrowed), Cow::Owned(mut owned)) => {
            owned.union_with(borrowed);
            owned
        }
        (Cow::Borrowed(left), Cow::Borrowed(right)) => {
            let (larger, smaller) = if left.len() >= right.len() {
                (left, right)
            } else {
                (right, left)
            };
            let mut result = larger.clone();
            result.union_with(smaller);
            result
        }
    }
}
