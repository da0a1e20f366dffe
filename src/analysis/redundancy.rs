//! Redundant and misplaced grouping clauses across binary operands.
//!
//! In `sum(a) by (job) / sum(b) by (job)` the clause on the left operand
//! adds nothing: the clause on the final operand already determines the
//! result labels. `without` is the exception and must be repeated on every
//! operand, so it is never considered redundant.
//!
//! Placement is checked over whole operator chains. A clause on a non-final
//! operand is flagged when the next operand carries the same clause or none.

use crate::issue::{Issue, IssueKind};
use crate::parser::aggregation::{AggregationClause, GroupingAction, extract_trailing};
use crate::parser::binary::{
    BinaryOp, SPLIT_PRIORITY, VectorMatching, before_comparison, split_chain, split_first,
};

/// Which operand of a binary expression carries a redundant clause.
///
/// Only the left clause can be redundant: the final operand's clause is the
/// one that determines the result labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedundantOn {
    Neither,
    Left,
}

/// Clause analysis of one binary split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAnalysis {
    /// Trailing clause of the left operand
    pub left: Option<AggregationClause>,
    /// Trailing clause of the right operand
    pub right: Option<AggregationClause>,
    pub redundant_on: RedundantOn,
    /// The left operand's clause sits on a non-final operand
    pub misplaced: bool,
}

impl BinaryAnalysis {
    /// Labels for an explicit `on (...)` when the right operand keeps a `by`
    /// clause
    pub fn vector_matching(&self) -> Option<VectorMatching> {
        self.right
            .as_ref()
            .filter(|clause| clause.action() == GroupingAction::By)
            .map(|clause| VectorMatching {
                labels: clause.labels().to_vec(),
            })
    }
}

/// Analyze the operands around one binary operator.
///
/// The operator itself is not an input: redundancy and placement follow the
/// same rule for every arithmetic operator.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::analysis::redundancy::{analyze_binary, RedundantOn};
///
/// let analysis = analyze_binary("sum(a) by (job)", "sum(b) by (job)");
/// assert_eq!(analysis.redundant_on, RedundantOn::Left);
/// assert!(analysis.misplaced);
///
/// let analysis = analyze_binary("sum(a) without (pod)", "sum(b) without (pod)");
/// assert_eq!(analysis.redundant_on, RedundantOn::Neither);
/// ```
pub fn analyze_binary(left: &str, right: &str) -> BinaryAnalysis {
    let left_clause = extract_trailing(left);
    let right_clause = extract_trailing(right);

    let redundant_on = match (&left_clause, &right_clause) {
        (Some(l), Some(r)) if l.is_equivalent(r) && l.action() != GroupingAction::Without => {
            RedundantOn::Left
        }
        _ => RedundantOn::Neither,
    };

    let misplaced = left_clause.as_ref().is_some_and(|l| {
        match extract_trailing(before_comparison(right)) {
            None => true,
            Some(next) => next.is_equivalent(l),
        }
    });

    BinaryAnalysis {
        left: left_clause,
        right: right_clause,
        redundant_on,
        misplaced,
    }
}

/// Report a clause repeated on both sides of the first top-level operator
pub fn check_redundant(expr: &str) -> Vec<Issue> {
    let Some((op, left, right)) = split_first(expr) else {
        return Vec::new();
    };

    let analysis = analyze_binary(left, right);
    match (analysis.redundant_on, analysis.left) {
        (RedundantOn::Left, Some(clause)) => vec![redundant_issue(&clause, op)],
        _ => Vec::new(),
    }
}

fn redundant_issue(clause: &AggregationClause, op: BinaryOp) -> Issue {
    Issue::new(
        IssueKind::RedundantClause,
        format!(
            "Redundant aggregation clause '{}' on left side of '{}' - only specify on the final operand",
            clause, op
        ),
    )
}

/// Report clauses sitting on intermediate operands, at most once per
/// operator
pub fn check_placement(expr: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    for op in SPLIT_PRIORITY {
        let operands = split_chain(expr, op);
        let misplaced = operands.windows(2).find_map(|pair| {
            let analysis = analyze_binary(pair[0], pair[1]);
            analysis.misplaced.then_some(analysis.left).flatten()
        });

        if let Some(clause) = misplaced {
            issues.push(Issue::new(
                IssueKind::MisplacedClause,
                format!(
                    "Aggregation clause '{}' should only appear on the final operand, not intermediate operands",
                    clause
                ),
            ));
        }
    }

    issues
}
