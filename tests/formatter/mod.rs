// Formatter test cases
//
// Multiline layouts for binary expressions over aggregations, and the
// expressions that decide whether a layout is needed at all.

/// Input expression and its multiline rendering
pub const MULTILINE_CASES: &[(&str, &str)] = &[
    // Identical by clauses: left clause dropped, on() added
    (
        r#"sum(rate(http_requests_total{job="api",status=~"5.."}[5m])) by (instance) / sum(rate(http_requests_total{job="api"}[5m])) by (instance)"#,
        r#"sum (
  rate(http_requests_total{job="api",status=~"5.."}[5m])
)
  / on (instance)
sum by (instance) (
  rate(http_requests_total{job="api"}[5m])
)"#,
    ),
    // No clauses at all
    (
        "sum(a) / sum(b)",
        "sum (
  a
)
  /
sum (
  b
)",
    ),
    // Single operand
    (r#"up{job="test"}"#, r#"up{job="test"}"#),
    // Different operators on each side
    (
        "avg(metric1) by (pod) * count(metric2) by (pod)",
        "avg (
  metric1
)
  * on (pod)
count by (pod) (
  metric2
)",
    ),
    // without must be kept on both sides
    (
        "sum(metric1) without (instance) * sum(metric2) without (instance)",
        "sum without (instance) (
  metric1
)
  *
sum without (instance) (
  metric2
)",
    ),
    // Different by clauses: both kept, on() from the right side
    (
        "sum(metric1) by (pod) / sum(metric2) by (instance)",
        "sum by (pod) (
  metric1
)
  / on (instance)
sum by (instance) (
  metric2
)",
    ),
    // Prefix style is kept as written
    (
        "sum by (job) (a) / sum by (job) (b)",
        "sum by (job) (
  a
)
  /
sum by (job) (
  b
)",
    ),
    // Non-aggregation operands pass through
    (
        "rate(errors_total[5m]) / rate(requests_total[5m])",
        "rate(errors_total[5m])
  /
rate(requests_total[5m])",
    ),
    // Division is split before subtraction
    (
        "sum(a) - sum(b) / sum(c)",
        "sum(a) - sum(b)
  /
sum (
  c
)",
    ),
];

/// Expressions that fit on one line with default options
pub const SINGLE_LINE_EXPRESSIONS: &[&str] = &[
    r#"up{job="test"}"#,
    "sum(metric) by (label)",
    "rate(http_requests_total[5m])",
    "sum by (job) (rate(http_requests_total[5m]))",
    r#"histogram_quantile(0.99, sum(rate(latency_seconds_bucket[5m])) by (le))"#,
    // Keywords inside strings do not count
    r#"up{job="by or on"}"#,
];

/// Expressions using two or more of and/or/unless/by/without/on/ignoring
pub const COMPLEX_EXPRESSIONS: &[&str] = &[
    "rate(m[5m]) and on(instance) other",
    "sum(a) by (job) / sum(b) by (job)",
    "a or b or c",
    "a unless b and c",
    "sum without (pod) (a) / ignoring (pod) b",
    "A AND B OR C",
];
