//! # Rusty PromQL Fmt
//!
//! A style checker and multiline formatter for PromQL expressions embedded in
//! YAML (Prometheus rule files, dashboards), built on the
//! [nom](https://github.com/rust-bakery/nom) parser combinator library.
//!
//! The crate does not build a full syntax tree. Expressions are scanned with
//! small nom parsers that understand nesting and quoting, which is enough to
//! find binary operands, grouping clauses and identifiers. Anything the
//! scanner cannot make sense of is left alone rather than rejected.
//!
//! ## Quick Start
//!
//! The main entry point is the [`analyze()`] function, which takes a YAML
//! document and returns the issues found along with the reformatted
//! document:
//!
//! ```rust
//! use rusty_promql_fmt::{analyze, CheckOptions};
//!
//! let document = r#"
//! groups:
//!   - name: api
//!     rules:
//!       - record: instance:http_errors:ratio_rate5m
//!         expr: sum(rate(http_errors_total[5m])) by (instance) / sum(rate(http_requests_total[5m])) by (instance)
//! "#;
//!
//! let analysis = analyze(document, &CheckOptions::default());
//! for issue in &analysis.issues {
//!     println!("{}", issue);
//! }
//! assert!(analysis.formatted.contains("  / on (instance)"));
//! ```
//!
//! ## Checks
//!
//! - Redundant grouping clauses: `sum(a) by (job) / sum(b) by (job)` only
//!   needs the clause on the final operand
//! - Misplaced grouping clauses on intermediate operands
//! - Consistent clause placement (`sum by (job) (x)` vs `sum(x) by (job)`)
//!   across a document
//! - Expressions that are too long or too complex for one line
//! - Metric and label naming, unit suffixes, recording rule names
//! - Instrumentation idioms: `rate()` over gauges, unguarded division,
//!   utilization ratios, `up` without `job`
//! - Alerts combining a `for:` clause with range windows
//!
//! Individual pieces can be used on their own:
//!
//! ```rust
//! use rusty_promql_fmt::format::multiline::format_multiline;
//!
//! assert_eq!(
//!     format_multiline("avg(metric1) by (pod) * count(metric2) by (pod)"),
//!     "avg (\n  metric1\n)\n  * on (pod)\ncount by (pod) (\n  metric2\n)"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`lexer`] - Low-level token parsers (identifiers, strings, durations) and the token scanner
//! - [`parser`] - Grouping clauses, binary operator splitting, vector selectors
//! - [`analysis`] - Identifier extraction, clause redundancy and style detection
//! - [`format`] - Multiline layout and YAML block rewriting
//! - [`validate`] - Best-practice checks
//! - [`rules`] - Rule file model and rule-level checks
//! - [`document`] - The [`analyze()`] entry point
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and never
//! installs a subscriber.

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod issue;
pub mod lexer;
pub mod parser;
pub mod rules;
pub mod validate;

// Re-export commonly used types and functions
pub use config::CheckOptions;
pub use document::{Analysis, analyze};
pub use error::{Error, Result};
pub use issue::{Issue, IssueKind};
pub use parser::aggregation::{AggregationClause, Grouping, GroupingAction};
pub use parser::binary::BinaryOp;
pub use parser::selector::{LabelMatchOp, LabelMatcher, VectorSelector};
