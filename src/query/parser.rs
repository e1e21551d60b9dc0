//! Infix to postfix conversion for boolean queries.
//!
//! Shunting-yard over whitespace-separated tokens. Operands are resolved
//! against the index while converting, so the postfix sequence carries posting
//! sets rather than words.

use crate::index::InvertedIndex;
use crate::set::HashSet;
use std::borrow::Cow;
use std::fmt;

/// Query operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Unary negation. Parsed, but has no evaluation rule.
    Not,
    /// `AND NOT`: set difference
    AndNot,
    /// Intersection
    And,
    /// Union
    Or,
}

impl Operator {
    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 2,
            Operator::AndNot => 1,
            Operator::And | Operator::Or => 0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Not => "NOT",
            Operator::AndNot => "AND NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }

    /// Single-token operator. `AND NOT` spans two tokens and is fused by
    /// [`to_postfix`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "NOT" => Some(Operator::Not),
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One element of a postfix query
#[derive(Debug, Clone)]
pub enum PostfixItem<'a> {
    /// A query word and its resolved posting set
    Operand { word: &'a str, set: Cow<'a, HashSet> },
    Operator(Operator),
}

/// Convert infix tokens to postfix, resolving every operand in `index`.
///
/// Operators pop the stack while the top binds at least as tightly, so
/// equal precedence associates to the left. Unknown words become empty sets.
pub fn to_postfix<'a>(tokens: &[&'a str], index: &'a InvertedIndex) -> Vec<PostfixItem<'a>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Operator> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let operator = match Operator::from_token(token) {
            Some(Operator::And) if tokens.get(i + 1) == Some(&"NOT") => {
                i += 1;
                Some(Operator::AndNot)
            }
            other => other,
        };

        match operator {
            Some(op) => {
                while let Some(&top) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    output.push(PostfixItem::Operator(top));
                }
                stack.push(op);
            }
            None => output.push(PostfixItem::Operand {
                word: token,
                set: index.get(token),
            }),
        }
        i += 1;
    }

    output.extend(stack.into_iter().rev().map(PostfixItem::Operator));
    output
}

/// Space-separated postfix form, e.g. `cat dog AND`
pub fn render_postfix(items: &[PostfixItem<'_>]) -> String {
    items
        .iter()
        .map(|item| match item {
            PostfixItem::Operand { word, .. } => *word,
            PostfixItem::Operator(op) => op.symbol(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
