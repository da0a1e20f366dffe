//! Multiline rendering of expressions.
//!
//! Only one level of binary split is rendered: the expression is cut at the
//! first top-level operator (see [`split_first`]) and each side is rendered
//! as an operand. An operand that is an aggregation call is unwrapped one
//! parenthesis level and its argument indented by two spaces:
//!
//! ```text
//! sum (
//!   rate(http_requests_total{job="api"}[5m])
//! )
//!   / on (instance)
//! sum by (instance) (
//!   rate(http_requests_total{job="api"}[5m])
//! )
//! ```
//!
//! Anything else is passed through unchanged.

use nom::{
    IResult, Parser,
    branch::alt,
    combinator::{consumed, eof},
};

use crate::analysis::redundancy::{RedundantOn, analyze_binary};
use crate::config::CheckOptions;
use crate::lexer::identifier::{Keyword, aggregation_op};
use crate::lexer::scan::{TokenKind, balanced_parens, tokenize};
use crate::lexer::whitespace::{ws_opt, ws1};
use crate::parser::aggregation::{Grouping, grouping, prefix_clause};
use crate::parser::binary::split_first;

const INDENT: &str = "  ";

/// Keywords whose repetition makes an expression complex enough to split
const COMPLEXITY_KEYWORDS: [Keyword; 7] = [
    Keyword::And,
    Keyword::Or,
    Keyword::Unless,
    Keyword::By,
    Keyword::Without,
    Keyword::On,
    Keyword::Ignoring,
];

/// Decide whether an expression should be written over several lines.
///
/// True when the expression is longer than `max_line_length` bytes (unless
/// the length test is disabled), or when it uses two or more of `and`, `or`,
/// `unless`, `by`, `without`, `on` and `ignoring`.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::{CheckOptions, format::multiline::should_be_multiline};
///
/// let options = CheckOptions::default();
/// assert!(!should_be_multiline("sum(metric) by (label)", &options));
/// assert!(should_be_multiline("rate(m[5m]) and on(instance) other or third", &options));
/// ```
pub fn should_be_multiline(expr: &str, options: &CheckOptions) -> bool {
    if !options.disable_line_length && expr.len() > options.max_line_length {
        return true;
    }

    let keyword_count = tokenize(expr)
        .iter()
        .filter(|tok| tok.kind == TokenKind::Identifier)
        .filter(|tok| Keyword::from_name(tok.text).is_some_and(|kw| COMPLEXITY_KEYWORDS.contains(&kw)))
        .count();

    keyword_count >= 2
}

/// An operand the formatter knows how to lay out
#[derive(Debug, Clone, PartialEq, Eq)]
struct AggregationCall<'a> {
    /// Aggregation operator as written
    op: &'a str,
    grouping: Option<Grouping>,
    /// Argument list without the outer parentheses
    inner: &'a str,
}

/// `sum(inner) by (labels)`
fn postfix_call(input: &str) -> IResult<&str, AggregationCall<'_>> {
    let (rest, (op, _)) = consumed(aggregation_op).parse(input)?;
    let (rest, _) = ws_opt(rest)?;
    let (rest, inner) = balanced_parens(rest)?;
    let (rest, _) = ws1(rest)?;
    let (rest, grouping) = grouping(rest)?;
    let (rest, _) = (ws_opt, eof).parse(rest)?;

    Ok((
        rest,
        AggregationCall {
            op,
            grouping: Some(grouping),
            inner,
        },
    ))
}

/// `sum by (labels) (inner)`
fn prefix_call(input: &str) -> IResult<&str, AggregationCall<'_>> {
    let (rest, (op, clause)) = prefix_clause(input)?;
    let (rest, inner) = balanced_parens(rest)?;
    let (rest, _) = (ws_opt, eof).parse(rest)?;

    Ok((
        rest,
        AggregationCall {
            op,
            grouping: Some(clause.grouping),
            inner,
        },
    ))
}

/// `sum(inner)`
fn simple_call(input: &str) -> IResult<&str, AggregationCall<'_>> {
    let (rest, (op, _)) = consumed(aggregation_op).parse(input)?;
    let (rest, _) = ws_opt(rest)?;
    let (rest, inner) = balanced_parens(rest)?;
    let (rest, _) = (ws_opt, eof).parse(rest)?;

    Ok((
        rest,
        AggregationCall {
            op,
            grouping: None,
            inner,
        },
    ))
}

fn aggregation_call(input: &str) -> IResult<&str, AggregationCall<'_>> {
    alt((postfix_call, prefix_call, simple_call)).parse(input)
}

/// Lay out a single operand.
///
/// Aggregation calls are rewritten in prefix form with their argument on its
/// own indented line. With `omit_clause` the grouping clause is dropped.
/// Anything that is not an aggregation call comes back trimmed but otherwise
/// unchanged.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::format::multiline::format_operand;
///
/// assert_eq!(format_operand("sum(x) by (job)", false), "sum by (job) (\n  x\n)");
/// assert_eq!(format_operand("sum(x) by (job)", true), "sum (\n  x\n)");
/// assert_eq!(format_operand("rate(x[5m])", false), "rate(x[5m])");
/// ```
pub fn format_operand(expr: &str, omit_clause: bool) -> String {
    let expr = expr.trim();
    let Ok((_, call)) = aggregation_call(expr) else {
        return expr.to_string();
    };

    let inner = call.inner.trim();
    match call.grouping {
        Some(grouping) if !omit_clause => {
            format!("{} {} (\n{}{}\n)", call.op, grouping, INDENT, inner)
        }
        _ => format!("{} (\n{}{}\n)", call.op, INDENT, inner),
    }
}

/// An operand opening with its own vector matching, e.g. the
/// `on (job) sum(x)` left over from splitting `a / on (job) sum(x)`
fn starts_with_matching(operand: &str) -> bool {
    tokenize(operand).first().is_some_and(|tok| {
        matches!(
            Keyword::from_name(tok.text),
            Some(Keyword::On | Keyword::Ignoring | Keyword::Bool | Keyword::GroupLeft | Keyword::GroupRight)
        )
    })
}

/// Render an expression over several lines.
///
/// The clause on the left operand is dropped when it duplicates the right
/// operand's (`without` excepted). When the right operand keeps a `by`
/// clause, the operator line gains an explicit `on (labels)`.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::format::multiline::format_multiline;
///
/// assert_eq!(
///     format_multiline("sum(a) / sum(b)"),
///     "sum (\n  a\n)\n  /\nsum (\n  b\n)"
/// );
/// assert_eq!(format_multiline(r#"up{job="test"}"#), r#"up{job="test"}"#);
/// ```
pub fn format_multiline(expr: &str) -> String {
    let Some((op, left, right)) = split_first(expr) else {
        return format_operand(expr, false);
    };

    let analysis = analyze_binary(left, right);
    let left = format_operand(left, analysis.redundant_on == RedundantOn::Left);
    let right_rendered = format_operand(right, false);

    let op_line = match analysis.vector_matching() {
        Some(matching) if !starts_with_matching(right) => format!("{} {}", op, matching),
        _ => op.to_string(),
    };

    format!("{}\n{}{}\n{}", left, INDENT, op_line, right_rendered)
}
