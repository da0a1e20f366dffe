//! Instrumentation idioms.
//!
//! These are best-effort lint rules. They look for a handful of trigger
//! patterns and make no attempt to prove an expression right or wrong:
//!
//! - `rate()`/`irate()` over something that does not look like a counter
//! - division without an `or` fallback or a `!= 0` guard
//! - a utilization ratio whose denominator is not a total
//! - `up` without a `job` matcher

use crate::analysis::extract::{Extracted, RateCall, extract};
use crate::issue::{Issue, IssueKind};
use crate::lexer::scan::{Token, TokenKind, tokenize};
use crate::parser::binary::{BinaryOp, split_top_level};
use crate::parser::selector::VectorSelector;

/// Suffixes of series that `rate()` is meant for
const COUNTER_SUFFIXES: [&str; 4] = ["_total", "_count", "_bucket", "_sum"];

fn looks_like_counter(metric: &str) -> bool {
    COUNTER_SUFFIXES.iter().any(|s| metric.ends_with(s)) || metric.contains("_seconds")
}

/// Flag `rate()`/`irate()` applied directly to a probable gauge
pub fn check_rate_targets(calls: &[RateCall]) -> Vec<Issue> {
    calls
        .iter()
        .filter(|call| !looks_like_counter(&call.metric))
        .map(|call| {
            Issue::new(
                IssueKind::Instrumentation,
                format!(
                    "Using {}() on '{}' which may not be a counter - rate() should only be used with counters",
                    call.function, call.metric
                ),
            )
        })
        .collect()
}

fn is_division(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Operator && tok.text.starts_with('/')
}

/// `or`, or `!=` followed by `0`
fn is_zero_guard(tokens: &[Token<'_>], i: usize) -> bool {
    let tok = &tokens[i];
    if tok.is_word("or") {
        return true;
    }
    tok.kind == TokenKind::Operator
        && tok.text == "!="
        && tokens
            .get(i + 1)
            .is_some_and(|next| next.kind == TokenKind::Number && next.text == "0")
}

/// Flag a division anywhere in the expression unless the expression also
/// carries a zero guard.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::instrumentation::check_division_guard;
///
/// assert_eq!(check_division_guard("sum(a) / sum(b)").len(), 1);
/// assert!(check_division_guard("sum(a) / sum(b) or 0").is_empty());
/// assert!(check_division_guard("sum(a) / (sum(b) != 0)").is_empty());
/// ```
pub fn check_division_guard(expr: &str) -> Vec<Issue> {
    let tokens = tokenize(expr);
    let divides = tokens.iter().any(is_division);
    let guarded = (0..tokens.len()).any(|i| is_zero_guard(&tokens, i));

    if divides && !guarded {
        vec![Issue::new(
            IssueKind::Instrumentation,
            "Division detected without zero-protection - consider adding '... or 1' or checking for non-zero denominator",
        )]
    } else {
        Vec::new()
    }
}

fn is_total(metric: &str) -> bool {
    let lower = metric.to_ascii_lowercase();
    lower.contains("_total") || lower.ends_with("total")
}

/// Require a total in the denominator of a utilization ratio.
///
/// Applies when some metric in `found` mentions `utilization` and the
/// expression has a top-level division.
pub fn check_utilization_divisor(expr: &str, found: &Extracted) -> Vec<Issue> {
    let mentions_utilization = found
        .metrics
        .iter()
        .any(|m| m.to_ascii_lowercase().contains("utilization"));
    if !mentions_utilization {
        return Vec::new();
    }

    let Some((_, denominator)) = split_top_level(expr, BinaryOp::Div) else {
        return Vec::new();
    };

    let denominator = extract(denominator);
    if denominator.metrics.iter().any(|m| is_total(m)) {
        return Vec::new();
    }

    vec![Issue::new(
        IssueKind::Instrumentation,
        "Utilization metric detected but denominator does not contain a 'total' metric - utilization should be calculated as (used / total), where the denominator metric name contains '_total' or 'total'",
    )]
}

/// Every `up` selector needs a positive `job` matcher
pub fn check_up_selectors(selectors: &[VectorSelector]) -> Vec<Issue> {
    selectors
        .iter()
        .filter(|sel| sel.name.as_deref() == Some("up") && !sel.selects_on("job"))
        .map(|_| {
            Issue::new(
                IssueKind::Instrumentation,
                "Synthetic metric 'up' should always include a job label selector (e.g., up{job=\"...\"}) to avoid matching multiple jobs",
            )
        })
        .collect()
}
