//! Aggregation clause placement style.
//!
//! An expression is classified as prefix style (`sum by (job) (x)`) or
//! postfix style (`sum(x) by (job)`) by its first recognizable aggregation.
//! Prefix is checked first over the whole expression: it is the more
//! specific shape.
//!
//! A [`StyleTally`] collects the styles of every expression in a document and
//! derives the dominant one, against which each expression is then compared.

use std::fmt;

use tracing::debug;

use crate::issue::{Issue, IssueKind};
use crate::lexer::identifier::Keyword;
use crate::lexer::scan::{Token, TokenKind, matching_close, tokenize};

/// Placement of grouping clauses in an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationStyle {
    Prefix,
    Postfix,
}

impl AggregationStyle {
    fn description(&self) -> &'static str {
        match self {
            AggregationStyle::Prefix => "prefix (e.g., 'sum by (label) (metric)')",
            AggregationStyle::Postfix => "postfix (e.g., 'sum(metric) by (label)')",
        }
    }
}

impl fmt::Display for AggregationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationStyle::Prefix => write!(f, "prefix"),
            AggregationStyle::Postfix => write!(f, "postfix"),
        }
    }
}

fn is_aggregation(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Identifier
        && Keyword::from_name(tok.text).is_some_and(|kw| kw.is_aggregation())
}

fn is_grouping_keyword(tok: Option<&Token<'_>>) -> bool {
    tok.is_some_and(|t| t.is_word("by") || t.is_word("without"))
}

fn is_lparen(tok: Option<&Token<'_>>) -> bool {
    tok.is_some_and(|t| t.kind == TokenKind::LParen)
}

/// `<agg> by|without (labels) (`
fn prefix_at(tokens: &[Token<'_>], i: usize) -> bool {
    is_grouping_keyword(tokens.get(i + 1))
        && is_lparen(tokens.get(i + 2))
        && matching_close(tokens, i + 2).is_some_and(|close| is_lparen(tokens.get(close + 1)))
}

/// `<agg>(...) by|without (`
fn postfix_at(tokens: &[Token<'_>], i: usize) -> bool {
    is_lparen(tokens.get(i + 1))
        && matching_close(tokens, i + 1).is_some_and(|close| {
            is_grouping_keyword(tokens.get(close + 1)) && is_lparen(tokens.get(close + 2))
        })
}

/// Classify the clause placement of an expression.
///
/// Returns `None` when no aggregation in the expression carries a clause.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::analysis::style::{detect, AggregationStyle};
///
/// assert_eq!(detect("sum(rate(x[5m])) by (job)"), Some(AggregationStyle::Postfix));
/// assert_eq!(detect("sum by (job) (rate(x[5m]))"), Some(AggregationStyle::Prefix));
/// assert_eq!(detect("sum(rate(x[5m]))"), None);
/// ```
pub fn detect(expr: &str) -> Option<AggregationStyle> {
    let tokens = tokenize(expr);
    let aggregations: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, tok)| is_aggregation(tok))
        .map(|(i, _)| i)
        .collect();

    if aggregations.iter().any(|&i| prefix_at(&tokens, i)) {
        Some(AggregationStyle::Prefix)
    } else if aggregations.iter().any(|&i| postfix_at(&tokens, i)) {
        Some(AggregationStyle::Postfix)
    } else {
        None
    }
}

/// Per-document count of clause placement styles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTally {
    prefix: usize,
    postfix: usize,
}

impl StyleTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally over a set of expressions
    pub fn from_expressions<'a>(expressions: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tally = Self::new();
        for expr in expressions {
            tally.record(detect(expr));
        }
        debug!(
            prefix = tally.prefix,
            postfix = tally.postfix,
            style = ?tally.dominant(),
            "aggregation style tallied"
        );
        tally
    }

    pub fn record(&mut self, style: Option<AggregationStyle>) {
        match style {
            Some(AggregationStyle::Prefix) => self.prefix += 1,
            Some(AggregationStyle::Postfix) => self.postfix += 1,
            None => {}
        }
    }

    pub fn prefix_count(&self) -> usize {
        self.prefix
    }

    pub fn postfix_count(&self) -> usize {
        self.postfix
    }

    /// The dominant style, or `None` with fewer than two classified
    /// expressions. Ties go to postfix.
    pub fn dominant(&self) -> Option<AggregationStyle> {
        if self.prefix + self.postfix < 2 {
            None
        } else if self.prefix > self.postfix {
            Some(AggregationStyle::Prefix)
        } else {
            Some(AggregationStyle::Postfix)
        }
    }

    /// Report an expression whose style differs from the dominant one
    pub fn check(&self, expr: &str) -> Option<Issue> {
        let dominant = self.dominant()?;
        let style = detect(expr)?;
        (style != dominant).then(|| {
            Issue::new(
                IssueKind::InconsistentStyle,
                format!(
                    "Inconsistent aggregation clause positioning: expression uses {} style, but file predominantly uses {}",
                    style.description(),
                    dominant.description()
                ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_postfix() {
        assert_eq!(detect("avg(metric) without (instance)"), Some(AggregationStyle::Postfix));
        assert_eq!(
            detect("topk(5, http_requests_total) by (job)"),
            Some(AggregationStyle::Postfix)
        );
    }

    #[test]
    fn test_detect_prefix() {
        assert_eq!(detect("max without (instance) (metric)"), Some(AggregationStyle::Prefix));
        assert_eq!(
            detect("topk by (job) (5, http_requests_total)"),
            Some(AggregationStyle::Prefix)
        );
        assert_eq!(detect("SUM BY (job) (x)"), Some(AggregationStyle::Prefix));
    }

    #[test]
    fn test_detect_prefix_wins_over_postfix() {
        assert_eq!(
            detect("sum(a) by (job) / sum by (job) (b)"),
            Some(AggregationStyle::Prefix)
        );
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect("up"), None);
        assert_eq!(detect("rate(x[5m]) > 0"), None);
        assert_eq!(detect("rate(x[5m]) and on (job) y"), None);
        assert_eq!(detect(r#"count(x{a="sum(y) by (job)"})"#), None);
        assert_eq!(detect("summary(x) by (job)"), None);
    }

    #[test]
    fn test_detect_unbalanced() {
        assert_eq!(detect("sum(x by (job)"), None);
    }

    #[test]
    fn test_tally_needs_two_samples() {
        let mut tally = StyleTally::new();
        assert_eq!(tally.dominant(), None);
        tally.record(Some(AggregationStyle::Prefix));
        assert_eq!(tally.dominant(), None);
        tally.record(None);
        assert_eq!(tally.dominant(), None);
        tally.record(Some(AggregationStyle::Prefix));
        assert_eq!(tally.dominant(), Some(AggregationStyle::Prefix));
    }

    #[test]
    fn test_tally_ties_go_to_postfix() {
        let tally = StyleTally::from_expressions(["sum by (a) (x)", "sum(x) by (a)"]);
        assert_eq!(tally.prefix_count(), 1);
        assert_eq!(tally.postfix_count(), 1);
        assert_eq!(tally.dominant(), Some(AggregationStyle::Postfix));
    }

    #[test]
    fn test_tally_check() {
        let tally =
            StyleTally::from_expressions(["sum(x) by (a)", "avg by (b) (y)", "max(z) by (c)"]);
        let issue = tally.check("avg by (b) (y)").unwrap();
        assert_eq!(issue.kind, IssueKind::InconsistentStyle);
        assert_eq!(
            issue.message,
            "Inconsistent aggregation clause positioning: expression uses prefix (e.g., 'sum by (label) (metric)') style, but file predominantly uses postfix (e.g., 'sum(metric) by (label)')"
        );
        assert!(tally.check("sum(x) by (a)").is_none());
        assert!(tally.check("up").is_none());
    }
}
