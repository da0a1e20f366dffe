//! Aggregation grouping clause parsing for PromQL.
//!
//! This module handles the grouping clauses used with aggregation operators:
//!
//! - `by (label1, label2)` - Group by specific labels, dropping all others
//! - `without (label1, label2)` - Drop specific labels, keeping all others
//!
//! A clause may be written before the aggregated expression (prefix,
//! `sum by (job) (x)`) or after it (postfix, `sum(x) by (job)`). The style
//! and redundancy checks work on [`AggregationClause`], which remembers
//! where the clause sat and how it was spelled.
//!
//! # Examples
//!
//! ```rust
//! use rusty_promql_fmt::parser::aggregation::{grouping, GroupingAction};
//!
//! let (rest, g) = grouping("by (job, instance)").unwrap();
//! assert!(rest.is_empty());
//! assert_eq!(g.action, GroupingAction::By);
//! assert_eq!(g.labels, vec!["job", "instance"]);
//!
//! let (rest, g) = grouping("without (instance)").unwrap();
//! assert!(rest.is_empty());
//! assert_eq!(g.action, GroupingAction::Without);
//! ```

use std::fmt;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{consumed, eof, opt, peek},
    multi::separated_list1,
    sequence::delimited,
};

use crate::lexer::{
    identifier::{aggregation_op, label_name},
    scan::TopLevel,
    whitespace::{ws_opt, ws1},
};

/// The action for aggregation grouping: `by` or `without`.
///
/// - [`GroupingAction::By`]: Group results by the specified labels only
/// - [`GroupingAction::Without`]: Group results by all labels except those specified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingAction {
    /// Group by specific labels, dropping all others.
    ///
    /// Example: `sum by (job) (http_requests)` groups by `job` label only.
    By,
    /// Drop specific labels, keeping all others.
    ///
    /// Example: `sum without (instance) (http_requests)` keeps all labels except `instance`.
    Without,
}

impl fmt::Display for GroupingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingAction::By => write!(f, "by"),
            GroupingAction::Without => write!(f, "without"),
        }
    }
}

/// Grouping clause for aggregation expressions.
///
/// # Example
///
/// ```rust
/// use rusty_promql_fmt::parser::aggregation::{Grouping, GroupingAction};
///
/// let g = Grouping {
///     action: GroupingAction::By,
///     labels: vec!["job".to_string(), "instance".to_string()],
/// };
/// assert_eq!(g.to_string(), "by (job, instance)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    /// The grouping action (by or without).
    pub action: GroupingAction,
    /// The label names to group by/without, in written order.
    pub labels: Vec<String>,
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.action, self.labels.join(", "))
    }
}

/// Parse a grouping clause: `by (label1, label2)` or `without (label1, label2)`
///
/// The label list must not be empty. A trailing comma is accepted.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::aggregation::{grouping, GroupingAction};
///
/// let (rest, g) = grouping("BY(job,)").unwrap();
/// assert!(rest.is_empty());
/// assert_eq!(g.action, GroupingAction::By);
/// assert_eq!(g.labels, vec!["job"]);
///
/// assert!(grouping("by ()").is_err());
/// ```
pub fn grouping(input: &str) -> IResult<&str, Grouping> {
    (
        // Parse the action (by or without)
        alt((
            tag_no_case("by").map(|_| GroupingAction::By),
            tag_no_case("without").map(|_| GroupingAction::Without),
        )),
        // Parse: ws "(" ws labels [","] ws ")"
        delimited(
            (ws_opt, char('('), ws_opt),
            separated_list1((ws_opt, char(','), ws_opt), label_name.map(String::from)),
            (ws_opt, opt(char(',')), ws_opt, char(')')),
        ),
    )
        .map(|(action, labels)| Grouping { action, labels })
        .parse(input)
}

/// Where a grouping clause sits relative to the aggregated expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClausePosition {
    /// `sum by (job) (x)`
    Prefix,
    /// `sum(x) by (job)`
    Postfix,
}

impl fmt::Display for ClausePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClausePosition::Prefix => write!(f, "prefix"),
            ClausePosition::Postfix => write!(f, "postfix"),
        }
    }
}

/// A grouping clause found in an expression, together with its placement
/// and its text as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationClause {
    pub grouping: Grouping,
    pub position: ClausePosition,
    /// Clause text as written, from the keyword to the closing parenthesis
    pub raw: String,
}

impl AggregationClause {
    pub fn action(&self) -> GroupingAction {
        self.grouping.action
    }

    pub fn labels(&self) -> &[String] {
        &self.grouping.labels
    }

    /// Two clauses are equivalent when they are spelled the same way.
    ///
    /// `by (a, b)` and `by (b, a)` are not equivalent, and neither are
    /// `by (job)` and `by(job)`.
    pub fn is_equivalent(&self, other: &AggregationClause) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Display for AggregationClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse `ws grouping ws EOF`, i.e. a clause that ends the input
fn terminal_grouping(input: &str) -> IResult<&str, (&str, Grouping)> {
    let (rest, _) = ws1(input)?;
    let (rest, clause) = consumed(grouping).parse(rest)?;
    let (rest, _) = ws_opt(rest)?;
    let (rest, _) = eof(rest)?;
    Ok((rest, clause))
}

/// Extract the grouping clause that terminates an expression, as in
/// `sum(rate(x[5m])) by (instance)`.
///
/// The clause must follow a closing parenthesis and be the last thing in the
/// expression. A clause followed by anything else, e.g. a comparison, does
/// not count.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::aggregation::extract_trailing;
///
/// let clause = extract_trailing("sum(metric) by (instance, job)").unwrap();
/// assert_eq!(clause.raw, "by (instance, job)");
///
/// assert!(extract_trailing("sum(metric) by (job) > 0.5").is_none());
/// assert!(extract_trailing("sum(metric)").is_none());
/// ```
pub fn extract_trailing(expr: &str) -> Option<AggregationClause> {
    TopLevel::new(expr)
        .filter(|&i| expr[..i].ends_with(')'))
        .find_map(|i| terminal_grouping(&expr[i..]).ok())
        .map(|(_, (raw, grouping))| AggregationClause {
            grouping,
            position: ClausePosition::Postfix,
            raw: raw.to_string(),
        })
}

/// Parse the head of a prefix-style aggregation, `sum by (job) `, stopping
/// in front of the parenthesized argument list. The operator is returned as
/// written.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::aggregation::{prefix_clause, ClausePosition};
///
/// let (rest, (op, clause)) = prefix_clause("max without (pod) (x)").unwrap();
/// assert_eq!(op, "max");
/// assert_eq!(clause.position, ClausePosition::Prefix);
/// assert_eq!(rest, "(x)");
/// ```
pub fn prefix_clause(input: &str) -> IResult<&str, (&str, AggregationClause)> {
    let (rest, (op, _)) = consumed(aggregation_op).parse(input)?;
    let (rest, _) = ws1(rest)?;
    let (rest, (raw, grouping)) = consumed(grouping).parse(rest)?;
    let (rest, _) = ws_opt(rest)?;
    let (rest, _) = peek(char('(')).parse(rest)?;

    Ok((
        rest,
        (
            op,
            AggregationClause {
                grouping,
                position: ClausePosition::Prefix,
                raw: raw.to_string(),
            },
        ),
    ))
}
