//! Metric name conventions.

use nom::{Parser, combinator::eof};

use crate::issue::{Issue, IssueKind};
use crate::lexer::identifier::metric_name;

/// Metrics generated by Prometheus itself, exempt from naming checks
const STANDARD_METRICS: [&str; 5] = [
    "up",
    "scrape_duration_seconds",
    "scrape_samples_scraped",
    "scrape_samples_post_metric_relabeling",
    "scrape_series_added",
];

/// Suffixes naming the metric type, which belongs in metadata
const TYPE_SUFFIXES: [&str; 4] = ["_gauge", "_counter", "_summary", "_histogram"];

/// Check `[a-zA-Z_:][a-zA-Z0-9_:]*`
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::naming::is_valid_metric_name;
///
/// assert!(is_valid_metric_name("job:http_requests:rate5m"));
/// assert!(!is_valid_metric_name("http.requests"));
/// assert!(!is_valid_metric_name("5xx_total"));
/// ```
pub fn is_valid_metric_name(name: &str) -> bool {
    (metric_name, eof).parse(name).is_ok()
}

/// A lowercase letter directly followed by an uppercase one
fn has_camel_case(name: &str) -> bool {
    name.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_lowercase() && w[1].is_ascii_uppercase())
}

/// Character set, camelCase and namespace prefix.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::naming::check_metric_name;
///
/// assert!(check_metric_name("http_requests_total").is_empty());
/// assert_eq!(check_metric_name("httpRequestsTotal").len(), 2);
/// assert!(check_metric_name("up").is_empty());
/// ```
pub fn check_metric_name(name: &str) -> Vec<Issue> {
    if STANDARD_METRICS.contains(&name) {
        return Vec::new();
    }

    let mut issues = Vec::new();

    if !is_valid_metric_name(name) {
        issues.push(Issue::new(
            IssueKind::MetricNaming,
            format!(
                "Metric '{}' contains invalid characters (must match [a-zA-Z_:][a-zA-Z0-9_:]*)",
                name
            ),
        ));
    }

    if has_camel_case(name) {
        issues.push(Issue::new(
            IssueKind::MetricNaming,
            format!("Metric '{}' should use snake_case, not camelCase", name),
        ));
    }

    if !name.contains('_') && !name.contains(':') {
        issues.push(Issue::new(
            IssueKind::MetricNaming,
            format!(
                "Metric '{}' should have an application prefix (e.g., 'myapp_{}')",
                name, name
            ),
        ));
    }

    issues
}

/// Case and type-suffix rules for names used as variables in an expression
pub fn check_variable_naming(name: &str) -> Vec<Issue> {
    if !is_valid_metric_name(name) {
        return vec![Issue::new(
            IssueKind::MetricNaming,
            format!(
                "Metric name '{}' should only contain alphanumeric characters, underscores, and colons, and must not start with a digit",
                name
            ),
        )];
    }

    let mut issues = Vec::new();

    if name.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(Issue::new(
            IssueKind::MetricNaming,
            format!(
                "Metric name '{}' should use lowercase with underscores (snake_case), not camelCase or PascalCase",
                name
            ),
        ));
    }

    for suffix in TYPE_SUFFIXES.iter().filter(|s| name.ends_with(*s)) {
        issues.push(Issue::new(
            IssueKind::MetricNaming,
            format!(
                "Metric name '{}' should not include the metric type ({}) in the name",
                name, suffix
            ),
        ));
    }

    issues
}
