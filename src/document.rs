//! Whole-document analysis.
//!
//! [`analyze`] is the entry point of the crate. It takes the text of a YAML
//! document, checks every `expr:`/`query:` field in it, and returns the
//! issues found together with the document rewritten so that complex
//! expressions use multiline blocks.
//!
//! The steps, in order:
//!
//! 1. Rule-file checks (alert hysteresis, recording rule names), when the
//!    document is a Prometheus rule file
//! 2. A first pass over all fields to establish the dominant clause style
//! 3. Per field: redundant clauses, misplaced clauses, multiline formatting,
//!    best practices, style consistency
//!
//! Lines that are not rewritten are kept byte for byte.

use serde::Serialize;
use tracing::{debug, trace};

use crate::analysis::redundancy::{check_placement, check_redundant};
use crate::analysis::style::StyleTally;
use crate::config::CheckOptions;
use crate::format::multiline::{format_multiline, should_be_multiline};
use crate::format::yaml::{ExprField, expr_field, format_yaml_block};
use crate::issue::{Issue, IssueKind};
use crate::rules::check_rule_file;
use crate::validate::check_best_practices;

/// Number of characters of an expression quoted in the multiline issue
const MULTILINE_PREVIEW_CHARS: usize = 60;

/// Result of analyzing a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Findings, in the order they were produced
    pub issues: Vec<Issue>,
    /// The document with multiline rewrites applied
    pub formatted: String,
}

impl Analysis {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// A line of the document, split from its line ending
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    body: &'a str,
    ending: &'a str,
}

fn split_lines(document: &str) -> Vec<Line<'_>> {
    document
        .split_inclusive('\n')
        .map(|line| {
            let body_len = line
                .strip_suffix("\r\n")
                .or_else(|| line.strip_suffix('\n'))
                .map_or(line.len(), str::len);
            let (body, ending) = line.split_at(body_len);
            Line { body, ending }
        })
        .collect()
}

fn multiline_issue(expr: &str) -> Issue {
    let preview: String = expr.chars().take(MULTILINE_PREVIEW_CHARS).collect();
    Issue::new(
        IssueKind::Multiline,
        format!("Expression should use multiline formatting: {}...", preview),
    )
}

/// Line ending for the lines of a rewritten block
fn block_line_ending<'a>(line: &Line<'a>, document: &str) -> &'a str {
    match line.ending {
        "" if document.contains("\r\n") => "\r\n",
        "" => "\n",
        ending => ending,
    }
}

/// Analyze a YAML document.
///
/// Never fails: anything that cannot be understood contributes no issue
/// and no rewrite.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::{analyze, CheckOptions, IssueKind};
///
/// let document = "expr: sum(a) by (job) / sum(b) by (job)\n";
/// let analysis = analyze(document, &CheckOptions::default());
///
/// assert_eq!(analysis.issues[0].kind, IssueKind::RedundantClause);
/// assert_eq!(
///     analysis.formatted,
///     "expr: |\n  sum (\n    a\n  )\n    / on (job)\n  sum by (job) (\n    b\n  )\n"
/// );
/// ```
pub fn analyze(document: &str, options: &CheckOptions) -> Analysis {
    let mut issues = check_rule_file(document);

    let lines = split_lines(document);
    let fields: Vec<(usize, ExprField<'_>)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| expr_field(line.body).ok().map(|(_, field)| (i, field)))
        .collect();

    let tally = StyleTally::from_expressions(fields.iter().map(|(_, field)| field.expression));

    let mut rewrites: Vec<Option<String>> = vec![None; lines.len()];

    for &(i, field) in &fields {
        let expr = field.expression;
        trace!(line = i + 1, expr, "analyzing expression");
        let before = issues.len();

        issues.extend(check_redundant(expr));
        issues.extend(check_placement(expr));

        if should_be_multiline(expr, options) {
            issues.push(multiline_issue(expr));

            let formatted = format_multiline(expr);
            if formatted.contains('\n') && field.can_rewrite() {
                debug!(line = i + 1, "rewriting expression as multiline block");
                let ending = block_line_ending(&lines[i], document);
                rewrites[i] = Some(format_yaml_block(
                    field.prefix,
                    &formatted,
                    field.indentation,
                    ending,
                ));
            }
        }

        issues.extend(check_best_practices(expr));
        issues.extend(tally.check(expr));

        trace!(line = i + 1, issues = issues.len() - before, "expression checked");
    }

    let mut formatted = String::with_capacity(document.len());
    for (line, rewrite) in lines.iter().zip(&rewrites) {
        formatted.push_str(rewrite.as_deref().unwrap_or(line.body));
        formatted.push_str(line.ending);
    }

    debug!(
        fields = fields.len(),
        issues = issues.len(),
        rewritten = rewrites.iter().flatten().count(),
        "document analyzed"
    );

    Analysis { issues, formatted }
}
