//! Best-practice checks over the identifiers of an expression.
//!
//! Each check is an independent function returning the issues it found:
//!
//! - [`naming`] - Metric name character set, case and namespacing
//! - [`suffix`] - Counter `_total`, base units and ratios
//! - [`recording`] - `level:metric:operations` recording rule names
//! - [`labels`] - Label names used in matchers
//! - [`instrumentation`] - `rate()` targets, division guards, utilization
//!   ratios and `up` selectors
//!
//! [`check_best_practices`] runs all of them over one expression.

pub mod instrumentation;
pub mod labels;
pub mod naming;
pub mod recording;
pub mod suffix;

use crate::analysis::extract::extract;
use crate::issue::Issue;

pub use instrumentation::{
    check_division_guard, check_rate_targets, check_up_selectors, check_utilization_divisor,
};
pub use labels::{check_label_name, check_label_names};
pub use naming::{check_metric_name, check_variable_naming};
pub use recording::check_recording_rule_name;
pub use suffix::check_metric_suffixes;

/// Run every best-practice check over an expression.
///
/// Per-metric checks come first, metric by metric in order of appearance,
/// followed by the expression-wide ones.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::check_best_practices;
///
/// assert!(check_best_practices(r#"sum(rate(http_requests_total{job="api"}[5m]))"#).is_empty());
///
/// let issues = check_best_practices("rate(httpRequests[5m])");
/// assert_eq!(issues.len(), 4);
/// ```
pub fn check_best_practices(expr: &str) -> Vec<Issue> {
    let found = extract(expr);
    let mut issues = Vec::new();

    for metric in &found.metrics {
        issues.extend(check_metric_name(metric));
        issues.extend(check_metric_suffixes(metric));
        issues.extend(check_recording_rule_name(metric));
    }

    for metric in &found.metrics {
        issues.extend(check_variable_naming(metric));
    }

    issues.extend(check_label_names(&found.labels));
    issues.extend(check_rate_targets(&found.rate_calls));
    issues.extend(check_division_guard(expr));
    issues.extend(check_utilization_divisor(expr, &found));
    issues.extend(check_up_selectors(&found.selectors));

    issues
}
