//! Unit and counter suffixes on metric names.

use crate::issue::{Issue, IssueKind};

/// Name fragments that suggest a counter
const COUNTER_FRAGMENTS: [&str; 10] = [
    "_count",
    "_requests",
    "_errors",
    "_failures",
    "_success",
    "_processed",
    "_received",
    "_sent",
    "_created",
    "_deleted",
];

/// Non-base unit suffixes and the base unit to use instead
const NON_BASE_UNITS: [(&str, &str); 20] = [
    ("_milliseconds", "_seconds"),
    ("_microseconds", "_seconds"),
    ("_nanoseconds", "_seconds"),
    ("_minutes", "_seconds"),
    ("_hours", "_seconds"),
    ("_days", "_seconds"),
    ("_kilobytes", "_bytes"),
    ("_megabytes", "_bytes"),
    ("_gigabytes", "_bytes"),
    ("_terabytes", "_bytes"),
    ("_millis", "_seconds"),
    ("_micros", "_seconds"),
    ("_nanos", "_seconds"),
    ("_kb", "_bytes"),
    ("_mb", "_bytes"),
    ("_gb", "_bytes"),
    ("_tb", "_bytes"),
    ("_ms", "_seconds"),
    ("_us", "_seconds"),
    ("_ns", "_seconds"),
];

/// Whether the name looks like a counter that lacks `_total`
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::suffix::is_counter_pattern;
///
/// assert!(is_counter_pattern("http_requests_count"));
/// assert!(!is_counter_pattern("http_requests_total"));
/// assert!(!is_counter_pattern("memory_usage_bytes"));
/// ```
pub fn is_counter_pattern(name: &str) -> bool {
    !name.ends_with("_total") && COUNTER_FRAGMENTS.iter().any(|f| name.contains(f))
}

/// Counter `_total`, base units and ratios.
pub fn check_metric_suffixes(name: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    if is_counter_pattern(name) {
        issues.push(Issue::new(
            IssueKind::MetricSuffix,
            format!("Counter metric '{}' should have '_total' suffix", name),
        ));
    }

    for (non_base, base) in NON_BASE_UNITS.iter().filter(|(s, _)| name.ends_with(s)) {
        issues.push(Issue::new(
            IssueKind::MetricSuffix,
            format!(
                "Metric '{}' should use base unit '{}' instead of '{}'",
                name, base, non_base
            ),
        ));
    }

    if name.contains("_percent") {
        issues.push(Issue::new(
            IssueKind::MetricSuffix,
            format!(
                "Metric '{}' should use '_ratio' suffix with values 0-1 instead of percentage",
                name
            ),
        ));
    }

    issues
}
