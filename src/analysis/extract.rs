//! Identifier extraction.
//!
//! Walks the token stream of an expression and collects what the validators
//! look at: metric names, vector selectors with their label matchers, and the
//! metric handed directly to `rate()`/`irate()`.
//!
//! The walk skips everything that only looks like a metric name: function
//! names, keywords, label lists of `by`/`without`/`on`/`ignoring`/
//! `group_left`/`group_right`, range windows in brackets, string literals and
//! template variables such as `$__rate_interval`.

use crate::lexer::identifier::Keyword;
use crate::lexer::scan::{Token, TokenKind, matching_close, tokenize};
use crate::parser::selector::{VectorSelector, vector_selector};

/// `rate(metric[...])` or `irate(metric{...}[...])`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCall {
    /// `rate` or `irate`, as written
    pub function: String,
    pub metric: String,
}

/// Identifiers found in one expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Distinct metric names in order of first appearance
    pub metrics: Vec<String>,
    /// Every selector, including repeated ones
    pub selectors: Vec<VectorSelector>,
    /// Distinct label names used in matchers, in order of first appearance
    pub labels: Vec<String>,
    pub rate_calls: Vec<RateCall>,
}

impl Extracted {
    fn add_selector(&mut self, selector: VectorSelector) {
        if let Some(name) = &selector.name
            && !self.metrics.contains(name)
        {
            self.metrics.push(name.clone());
        }
        for matcher in &selector.matchers {
            if !self.labels.contains(&matcher.name) {
                self.labels.push(matcher.name.clone());
            }
        }
        self.selectors.push(selector);
    }
}

fn kind_at(tokens: &[Token<'_>], i: usize) -> Option<TokenKind> {
    tokens.get(i).map(|t| t.kind)
}

fn is_rate_function(tok: &Token<'_>) -> bool {
    tok.is_word("rate") || tok.is_word("irate")
}

fn is_special_float(tok: &Token<'_>) -> bool {
    tok.is_word("inf") || tok.is_word("nan")
}

/// Index of the first token starting at or after byte offset `end`
fn first_token_after(tokens: &[Token<'_>], from: usize, end: usize) -> usize {
    tokens[from..]
        .iter()
        .position(|t| t.offset >= end)
        .map_or(tokens.len(), |p| from + p)
}

/// Collect metric names, selectors, matcher labels and rate calls.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::analysis::extract::extract;
///
/// let found = extract(r#"sum by (instance) (rate(http_requests_total{job="api"}[5m]))"#);
/// assert_eq!(found.metrics, vec!["http_requests_total"]);
/// assert_eq!(found.labels, vec!["job"]);
/// assert_eq!(found.rate_calls[0].metric, "http_requests_total");
/// ```
pub fn extract(expr: &str) -> Extracted {
    let tokens = tokenize(expr);
    let mut found = Extracted::default();
    let mut i = 0;

    while i < tokens.len() {
        let tok = tokens[i];
        match tok.kind {
            TokenKind::Identifier => {
                let template_var = i > 0 && tokens[i - 1].text == "$";
                let keyword = Keyword::from_name(tok.text);

                if kind_at(&tokens, i + 1) == Some(TokenKind::LParen) {
                    if keyword.is_some_and(|kw| kw.takes_label_list()) {
                        // Label list, not arguments
                        i = matching_close(&tokens, i + 1).map_or(tokens.len(), |c| c + 1);
                        continue;
                    }
                    if is_rate_function(&tok)
                        && let Some(arg) = tokens.get(i + 2)
                        && arg.kind == TokenKind::Identifier
                        && matches!(
                            kind_at(&tokens, i + 3),
                            Some(TokenKind::LBracket | TokenKind::LBrace)
                        )
                    {
                        found.rate_calls.push(RateCall {
                            function: tok.text.to_string(),
                            metric: arg.text.to_string(),
                        });
                    }
                    i += 1;
                } else if template_var || keyword.is_some() || is_special_float(&tok) {
                    i += 1;
                } else {
                    match vector_selector(&expr[tok.offset..]) {
                        Ok((rest, selector)) => {
                            found.add_selector(selector);
                            i = first_token_after(&tokens, i + 1, expr.len() - rest.len());
                        }
                        Err(_) => i += 1,
                    }
                }
            }
            TokenKind::LBrace => match vector_selector(&expr[tok.offset..]) {
                Ok((rest, selector)) => {
                    found.add_selector(selector);
                    i = first_token_after(&tokens, i + 1, expr.len() - rest.len());
                }
                Err(_) => {
                    i = matching_close(&tokens, i).map_or(i + 1, |c| c + 1);
                }
            },
            TokenKind::LBracket => {
                i = matching_close(&tokens, i).map_or(i + 1, |c| c + 1);
            }
            _ => i += 1,
        }
    }

    found
}
