//! Binary operators for PromQL
//!
//! The analyzer does not climb operator precedence. It splits an expression
//! at the first top-level occurrence of a space-padded operator, trying the
//! arithmetic operators in a fixed priority order:
//!
//! 1. `/`
//! 2. `*`
//! 3. `+`
//! 4. `-`
//! 5. `%`
//! 6. `^`
//!
//! Comparison operators (`==`, `!=`, `<`, `<=`, `>`, `>=`) are never split
//! on; they only bound the operand that follows a clause in placement checks.
//!
//! Vector matching modifiers are rendered, not parsed: the formatter adds an
//! explicit `on (labels)` to the operator line when the right operand keeps a
//! `by` clause.

use std::fmt;

use crate::lexer::scan::{TopLevel, find_top_level};

/// Binary operators the analyzer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Mod, // %
    Pow, // ^

    // Comparison
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

/// Arithmetic operators in the order they are tried when splitting
pub const SPLIT_PRIORITY: [BinaryOp; 6] = [
    BinaryOp::Div,
    BinaryOp::Mul,
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mod,
    BinaryOp::Pow,
];

/// Comparison operators
pub const COMPARISONS: [BinaryOp; 6] = [
    BinaryOp::Gt,
    BinaryOp::Lt,
    BinaryOp::Ge,
    BinaryOp::Le,
    BinaryOp::Eq,
    BinaryOp::Ne,
];

impl BinaryOp {
    /// Get the operator as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    /// The operator with one space on each side, which is the only form the
    /// splitter recognizes: `a / b` splits, `a/b` does not.
    pub fn padded(&self) -> String {
        format!(" {} ", self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split an expression at the first top-level occurrence of `op`.
///
/// Both sides are trimmed. Returns `None` when the operator only occurs
/// inside parentheses or string literals, or not at all.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::binary::{split_top_level, BinaryOp};
///
/// let (left, right) = split_top_level("sum(a / b) / sum(c)", BinaryOp::Div).unwrap();
/// assert_eq!(left, "sum(a / b)");
/// assert_eq!(right, "sum(c)");
///
/// assert!(split_top_level("sum(a / b)", BinaryOp::Div).is_none());
/// ```
pub fn split_top_level(expr: &str, op: BinaryOp) -> Option<(&str, &str)> {
    let needle = op.padded();
    find_top_level(expr, &needle)
        .map(|at| (expr[..at].trim(), expr[at + needle.len()..].trim()))
}

/// Split an expression at the first operator in [`SPLIT_PRIORITY`] that
/// occurs at top level.
pub fn split_first(expr: &str) -> Option<(BinaryOp, &str, &str)> {
    SPLIT_PRIORITY
        .iter()
        .find_map(|&op| split_top_level(expr, op).map(|(l, r)| (op, l, r)))
}

/// Split an expression at every top-level occurrence of `op`, yielding the
/// trimmed operands of the chain `a op b op c`.
///
/// A single element means the operator does not occur at top level.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::binary::{split_chain, BinaryOp};
///
/// assert_eq!(split_chain("a + (b + c) + d", BinaryOp::Add), vec!["a", "(b + c)", "d"]);
/// assert_eq!(split_chain("a", BinaryOp::Add), vec!["a"]);
/// ```
pub fn split_chain(expr: &str, op: BinaryOp) -> Vec<&str> {
    let needle = op.padded();
    let mut operands = Vec::new();
    let mut start = 0;

    for at in TopLevel::new(expr) {
        if at >= start && expr[at..].starts_with(&needle) {
            operands.push(expr[start..at].trim());
            start = at + needle.len();
        }
    }
    operands.push(expr[start..].trim());

    operands
}

/// Cut an operand at its first top-level comparison, so that in
/// `sum(x) > 0.5` only `sum(x)` is left.
pub fn before_comparison(expr: &str) -> &str {
    COMPARISONS
        .iter()
        .filter_map(|op| find_top_level(expr, &op.padded()))
        .min()
        .map_or(expr, |at| expr[..at].trim())
}

/// Explicit vector matching added to an operator line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMatching {
    /// Labels to match on
    pub labels: Vec<String>,
}

impl fmt::Display for VectorMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "on ({})", self.labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operator_splits_when_padded() {
        for op in SPLIT_PRIORITY {
            let expr = format!("a{}b", op.padded());
            assert_eq!(split_top_level(&expr, op), Some(("a", "b")), "{}", op);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(BinaryOp::Div.to_string(), "/");
        assert_eq!(BinaryOp::Ge.padded(), " >= ");
    }

    #[test]
    fn test_split_top_level_requires_padding() {
        assert!(split_top_level("a/b", BinaryOp::Div).is_none());
        assert_eq!(split_top_level("a / b", BinaryOp::Div), Some(("a", "b")));
    }

    #[test]
    fn test_split_top_level_first_match_wins() {
        let (left, right) = split_top_level("a - b - c", BinaryOp::Sub).unwrap();
        assert_eq!(left, "a");
        assert_eq!(right, "b - c");
    }

    #[test]
    fn test_split_first_priority() {
        let (op, left, right) = split_first("a + b / c").unwrap();
        assert_eq!(op, BinaryOp::Div);
        assert_eq!(left, "a + b");
        assert_eq!(right, "c");

        assert!(split_first("up{job=\"a / b\"}").is_none());
    }

    #[test]
    fn test_split_chain_skips_quoted() {
        assert_eq!(
            split_chain(r#"x{a=" * "} * y * z"#, BinaryOp::Mul),
            vec![r#"x{a=" * "}"#, "y", "z"]
        );
    }

    #[test]
    fn test_before_comparison() {
        assert_eq!(before_comparison("sum(x) > 0.5"), "sum(x)");
        assert_eq!(before_comparison("sum(x) by (job) >= 1 == 1"), "sum(x) by (job)");
        assert_eq!(before_comparison("sum(x > 1)"), "sum(x > 1)");
        assert_eq!(before_comparison("sum(x)"), "sum(x)");
    }

    #[test]
    fn test_vector_matching_display() {
        let m = VectorMatching {
            labels: vec!["instance".to_string(), "job".to_string()],
        };
        assert_eq!(m.to_string(), "on (instance, job)");
    }
}
