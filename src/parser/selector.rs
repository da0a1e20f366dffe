//! Vector selector parsing for PromQL
//!
//! A vector selector selects a set of time series by metric name and label
//! matchers.
//!
//! Syntax:
//! ```text
//! metric_name
//! metric_name{label_matchers}
//! {label_matchers}
//! ```
//!
//! Label matchers:
//! - `=`  : equality
//! - `!=` : inequality
//! - `=~` : regex match
//! - `!~` : regex not match
//!
//! Label names inside matchers are lexed loosely (anything up to the match
//! operator) so that a badly named label still yields a matcher the label
//! validators can complain about.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{opt, value},
    multi::separated_list0,
    sequence::{delimited, terminated},
};

use crate::lexer::{
    identifier::metric_name,
    string::{literal_body, string_literal},
    whitespace::{is_whitespace, ws_opt},
};

/// Label matching operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatchOp {
    /// `=` - Exact string equality
    Equal,
    /// `!=` - String inequality
    NotEqual,
    /// `=~` - Regex match
    RegexMatch,
    /// `!~` - Regex not match
    RegexNotMatch,
}

impl LabelMatchOp {
    /// Check if this is a negative matcher (!=, !~)
    pub fn is_negative(&self) -> bool {
        matches!(self, LabelMatchOp::NotEqual | LabelMatchOp::RegexNotMatch)
    }
}

/// A single label matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatcher {
    /// Label name as written (e.g., "job", "__name__")
    pub name: String,
    /// Matching operator
    pub op: LabelMatchOp,
    /// Value to match against, without quotes and with escapes left as written
    pub value: String,
}

impl LabelMatcher {
    /// Create a new label matcher
    pub fn new(name: impl Into<String>, op: LabelMatchOp, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op,
            value: value.into(),
        }
    }
}

/// A vector selector: an optional metric name plus label matchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSelector {
    /// Metric name (absent for `{job="x"}`)
    pub name: Option<String>,
    /// Label matchers, in written order
    pub matchers: Vec<LabelMatcher>,
}

impl VectorSelector {
    /// Create a new vector selector with just a metric name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            matchers: Vec::new(),
        }
    }

    /// Check for a positive (`=` or `=~`) matcher on `label`
    pub fn selects_on(&self, label: &str) -> bool {
        self.matchers
            .iter()
            .any(|m| m.name == label && !m.op.is_negative())
    }
}

/// Parse a label match operator
fn label_match_op(input: &str) -> IResult<&str, LabelMatchOp> {
    alt((
        value(LabelMatchOp::NotEqual, tag("!=")),
        value(LabelMatchOp::RegexNotMatch, tag("!~")),
        value(LabelMatchOp::RegexMatch, tag("=~")),
        value(LabelMatchOp::Equal, tag("=")),
    ))
    .parse(input)
}

/// Loose label name: everything up to whitespace, an operator or a delimiter
fn matcher_label(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| {
        !is_whitespace(c) && !matches!(c, '=' | '!' | '~' | ',' | '{' | '}' | '"' | '\'' | '`')
    })
    .parse(input)
}

/// Parse a single label matcher: `label_name op "value"`
fn label_matcher(input: &str) -> IResult<&str, LabelMatcher> {
    let (input, _) = ws_opt(input)?;
    let (input, name) = matcher_label(input)?;
    let (input, _) = ws_opt(input)?;
    let (input, op) = label_match_op(input)?;
    let (input, _) = ws_opt(input)?;
    let (input, value) = string_literal(input)?;

    Ok((input, LabelMatcher::new(name, op, literal_body(value))))
}

/// One comma-separated item inside braces
#[derive(Debug, Clone, PartialEq, Eq)]
enum MatcherItem {
    /// `{"metric.name"}`, a quoted metric name
    QuotedName(String),
    Matcher(LabelMatcher),
}

fn quoted_metric_name(input: &str) -> IResult<&str, MatcherItem> {
    let (input, _) = ws_opt(input)?;
    let (input, name) = string_literal(input)?;

    Ok((input, MatcherItem::QuotedName(literal_body(name).to_string())))
}

fn matcher_item(input: &str) -> IResult<&str, MatcherItem> {
    alt((label_matcher.map(MatcherItem::Matcher), quoted_metric_name)).parse(input)
}

fn matcher_items(input: &str) -> IResult<&str, Vec<MatcherItem>> {
    delimited(
        (char('{'), ws_opt),
        terminated(
            separated_list0(delimited(ws_opt, char(','), ws_opt), matcher_item),
            opt((ws_opt, char(','))), // Allow trailing comma
        ),
        (ws_opt, char('}')),
    )
    .parse(input)
}

fn split_items(items: Vec<MatcherItem>) -> (Option<String>, Vec<LabelMatcher>) {
    let mut name = None;
    let mut matchers = Vec::new();
    for item in items {
        match item {
            MatcherItem::QuotedName(n) => {
                name.get_or_insert(n);
            }
            MatcherItem::Matcher(m) => matchers.push(m),
        }
    }
    (name, matchers)
}

/// Parse label matchers inside braces: `{label="value", ...}`
///
/// A quoted metric name among the matchers (`{"http.requests"}`) is not a
/// matcher and is left out; [`vector_selector`] picks it up as the name.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::selector::{label_matchers, LabelMatchOp};
///
/// let (rest, matchers) = label_matchers(r#"{job="api", code=~"5.."}[5m]"#).unwrap();
/// assert_eq!(rest, "[5m]");
/// assert_eq!(matchers[1].name, "code");
/// assert_eq!(matchers[1].op, LabelMatchOp::RegexMatch);
/// assert_eq!(matchers[1].value, "5..");
/// ```
pub fn label_matchers(input: &str) -> IResult<&str, Vec<LabelMatcher>> {
    matcher_items
        .map(|items| split_items(items).1)
        .parse(input)
}

/// Parse a vector selector
///
/// Supports:
/// - `metric_name` - Simple metric name
/// - `metric_name{label="value"}` - Metric with label matchers
/// - `{label="value"}` - Label matchers only
/// - `{"metric.name", label="value"}` - Quoted metric name inside braces
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::parser::selector::vector_selector;
///
/// let (_, sel) = vector_selector("http_requests_total").unwrap();
/// assert_eq!(sel.name, Some("http_requests_total".to_string()));
///
/// let (_, sel) = vector_selector(r#"foo {bar="baz"}"#).unwrap();
/// assert_eq!(sel.name, Some("foo".to_string()));
/// assert_eq!(sel.matchers.len(), 1);
/// ```
pub fn vector_selector(input: &str) -> IResult<&str, VectorSelector> {
    match metric_name(input) {
        Ok((rest, name)) => {
            let (rest, matchers) = opt((ws_opt, label_matchers).map(|(_, m)| m)).parse(rest)?;
            Ok((
                rest,
                VectorSelector {
                    name: Some(name.to_string()),
                    matchers: matchers.unwrap_or_default(),
                },
            ))
        }
        Err(_) => {
            let (rest, (name, matchers)) = matcher_items.map(split_items).parse(input)?;
            Ok((rest, VectorSelector { name, matchers }))
        }
    }
}
