// Integration tests for the best-practice checks
//
// These tests run the validators over the names and expressions in the
// validator test data, then through `check_best_practices` as a whole.

mod common;
mod validator;

use pretty_assertions::assert_eq;
use rusty_promql_fmt::IssueKind;
use rusty_promql_fmt::validate::{
    check_best_practices, check_division_guard, check_label_name, check_metric_name,
    check_metric_suffixes, check_recording_rule_name, check_variable_naming,
};
use validator::{
    CLEAN_EXPRESSIONS, COUNTERS_WITHOUT_TOTAL, GUARDED_DIVISIONS, LABEL_NAMES,
    NON_BASE_UNIT_METRICS, UNGUARDED_DIVISIONS, WELL_NAMED_METRICS,
};

#[test]
fn test_well_named_metrics_from_test_data() {
    for name in WELL_NAMED_METRICS {
        let mut issues = check_metric_name(name);
        issues.extend(check_metric_suffixes(name));
        issues.extend(check_recording_rule_name(name));
        issues.extend(check_variable_naming(name));
        assert!(issues.is_empty(), "Unexpected issues for '{}': {:#?}", name, issues);
    }
}

#[test]
fn test_non_base_units_from_test_data() {
    for (name, base) in NON_BASE_UNIT_METRICS {
        let issues = check_metric_suffixes(name);
        assert_eq!(issues.len(), 1, "Expected one issue for '{}': {:#?}", name, issues);
        assert_has_issue!(issues, IssueKind::MetricSuffix, *base);
    }
}

#[test]
fn test_counters_without_total_from_test_data() {
    for name in COUNTERS_WITHOUT_TOTAL {
        let issues = check_metric_suffixes(name);
        assert_has_issue!(issues, IssueKind::MetricSuffix, "'_total' suffix");
    }
}

#[test]
fn test_label_names_from_test_data() {
    for (name, count) in LABEL_NAMES {
        let issues = check_label_name(name);
        assert_eq!(issues.len(), *count, "Unexpected issues for label '{}'", name);
    }
}

#[test]
fn test_division_guards_from_test_data() {
    for expr in UNGUARDED_DIVISIONS {
        assert_eq!(check_division_guard(expr).len(), 1, "Expected a division issue for: {}", expr);
    }
    for expr in GUARDED_DIVISIONS {
        assert!(check_division_guard(expr).is_empty(), "Unexpected division issue for: {}", expr);
    }
}

#[test]
fn test_clean_expressions_from_test_data() {
    for expr in CLEAN_EXPRESSIONS {
        let issues = check_best_practices(expr);
        assert!(issues.is_empty(), "Unexpected issues for '{}': {:#?}", expr, issues);
    }
}

/// `httpRequestsTotal` is camelCase and has no namespace prefix
#[test]
fn test_camel_case_metric() {
    let messages: Vec<String> = check_metric_name("httpRequestsTotal")
        .into_iter()
        .map(|issue| issue.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Metric 'httpRequestsTotal' should use snake_case, not camelCase",
            "Metric 'httpRequestsTotal' should have an application prefix (e.g., 'myapp_httpRequestsTotal')",
        ]
    );
}

#[test]
fn test_milliseconds_suffix() {
    let issues = check_best_practices("http_duration_milliseconds > 100");
    assert_eq!(issue_kinds!(issues), vec![IssueKind::MetricSuffix]);
    assert_eq!(
        issues[0].message,
        "Metric 'http_duration_milliseconds' should use base unit '_seconds' instead of '_milliseconds'"
    );
}

#[test]
fn test_unguarded_division_in_expression() {
    let issues = check_best_practices("sum(a) / sum(b)");
    assert_has_issue!(issues, IssueKind::Instrumentation, "zero-protection");

    let issues = check_best_practices("sum(a) / sum(b) or 0");
    assert_no_issue!(issues, IssueKind::Instrumentation);
}

#[test]
fn test_underscore_labels_in_selectors() {
    let issues = check_best_practices(r#"build_info{_internal="true"}"#);
    assert_eq!(issue_kinds!(issues), vec![IssueKind::LabelNaming]);
    assert_eq!(
        issues[0].message,
        "Label name '_internal' should not start with an underscore (reserved for internal use)"
    );

    let issues = check_best_practices(r#"{__name__="x"}"#);
    assert_has_issue!(issues, IssueKind::LabelNaming, "double leading underscores");
}

#[test]
fn test_rate_over_gauge() {
    let issues = check_best_practices(r#"rate(process_resident_memory_bytes{job="api"}[5m])"#);
    assert_eq!(issue_kinds!(issues), vec![IssueKind::Instrumentation]);
    assert!(issues[0].message.starts_with("Using rate() on 'process_resident_memory_bytes'"));
}

#[test]
fn test_utilization_ratio() {
    let issues = check_best_practices("sum(node_cpu_utilization) / sum(node_cpu_capacity) or vector(0)");
    assert_has_issue!(issues, IssueKind::Instrumentation, "Utilization metric");

    let issues = check_best_practices("sum(node_cpu_utilization) / sum(node_cpu_total) or vector(0)");
    assert_no_issue!(issues, IssueKind::Instrumentation);
}

#[test]
fn test_up_without_job() {
    let issues = check_best_practices(r#"up{instance="host:9100"} == 0"#);
    assert_eq!(issue_kinds!(issues), vec![IssueKind::Instrumentation]);
    assert!(issues[0].message.contains("up{job=\"...\"}"));
}

#[test]
fn test_recording_rule_names() {
    assert!(check_recording_rule_name("job:http_requests:rate5m").is_empty());
    assert!(check_recording_rule_name("http_requests_total").is_empty());

    let messages: Vec<String> = check_recording_rule_name("job:http_requests_total:rate5m")
        .into_iter()
        .map(|issue| issue.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Recording rule 'job:http_requests_total:rate5m' should strip '_total' suffix from counter metrics when using rate() or irate() (expected: 'job:http_requests:rate5m')"
        ]
    );

    let issues = check_recording_rule_name(":httpRequests:");
    assert_eq!(issues.len(), 4);
    assert!(issues.iter().all(|issue| issue.kind == IssueKind::RecordingRule));
}
