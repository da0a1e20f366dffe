//! Recording rule names: `level:metric:operations`.
//!
//! `level` names the labels the result is aggregated to, `metric` is the
//! source metric and `operations` lists what was applied, newest first, as
//! in `job:http_requests:rate5m`.

use crate::issue::{Issue, IssueKind};

/// Operations components too vague to be useful on their own
const AMBIGUOUS_OPERATIONS: [(&str, &str); 2] = [
    (
        "value",
        "should not use 'value' as operations component (discouraged for being ambiguous and redundant)",
    ),
    (
        "avg",
        "should not use 'avg' alone (discouraged for being ambiguous - specify time window, e.g., 'avg5m')",
    ),
];

/// `[a-z0-9_]+`
fn is_valid_operations(operations: &str) -> bool {
    !operations.is_empty()
        && operations
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn issue(name: &str, detail: impl std::fmt::Display) -> Issue {
    Issue::new(
        IssueKind::RecordingRule,
        format!("Recording rule '{}' {}", name, detail),
    )
}

/// Check a name against the recording rule convention.
///
/// Names without a colon are not recording rule names and pass. Everything
/// after the second colon is the operations component.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::recording::check_recording_rule_name;
///
/// assert!(check_recording_rule_name("job:http_requests:rate5m").is_empty());
/// assert!(check_recording_rule_name("http_requests_total").is_empty());
///
/// let issues = check_recording_rule_name("job:http_requests_total:rate5m");
/// assert_eq!(issues.len(), 1);
/// ```
pub fn check_recording_rule_name(name: &str) -> Vec<Issue> {
    if !name.contains(':') {
        return Vec::new();
    }

    let mut parts = name.splitn(3, ':');
    let level = parts.next().unwrap_or_default();
    let metric = parts.next().unwrap_or_default();
    let operations = parts.next();

    let mut issues = Vec::new();

    if level.is_empty() {
        issues.push(issue(
            name,
            "has empty level component. Level should represent aggregation labels (e.g., 'job', 'instance')",
        ));
    }

    if metric.is_empty() {
        issues.push(issue(name, "has empty metric component"));
    }

    if metric.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push(issue(
            name,
            "metric component should use snake_case, not camelCase",
        ));
    }

    let Some(operations) = operations else {
        return issues;
    };

    if operations.is_empty() {
        issues.push(issue(
            name,
            "has empty operations component. Operations should describe transformations (e.g., 'rate5m', 'sum')",
        ));
    }

    if !is_valid_operations(operations) {
        issues.push(issue(
            name,
            "operations component should only contain lowercase letters, digits, and underscores",
        ));
    }

    for (ambiguous, detail) in AMBIGUOUS_OPERATIONS {
        if operations == ambiguous {
            issues.push(issue(name, detail));
        }
    }

    // `irate` contains `rate`
    if metric.contains("_total") && operations.contains("rate") {
        let stripped = metric.strip_suffix("_total").unwrap_or(metric);
        issues.push(issue(
            name,
            format!(
                "should strip '_total' suffix from counter metrics when using rate() or irate() (expected: '{}:{}:{}')",
                level, stripped, operations
            ),
        ));
    }

    issues
}
