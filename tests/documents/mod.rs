// YAML documents carrying PromQL expressions
//
// Prometheus rule files and dashboard-style documents, plus the single-line
// field cases the document rewriter has to get right.

use crate::common::DocumentCase;

/// A rule file with a recording rule and two alerts
pub const RULE_FILE: &str = r#"groups:
  - name: api
    interval: 30s
    rules:
      - record: job:http_requests:rate5m
        expr: sum(rate(http_requests_total{job="api"}[5m])) by (job)
      - alert: HighErrorRate
        expr: sum(rate(http_errors_total[5m])) by (instance) / sum(rate(http_requests_total[5m])) by (instance) > 0.1
        for: 10m
        labels:
          severity: page
      - alert: ApiDown
        expr: up{job="api"} == 0
        for: 5m
"#;

/// Two alerts over the same range window: one fires immediately, one waits
pub const PENDING_DURATION_ALERTS: &str = r#"groups:
  - name: traffic
    rules:
      - alert: HighTrafficNow
        expr: rate(http_requests_total{job="api"}[5m]) > 100
        for: 0s
      - alert: HighTrafficSustained
        expr: rate(http_requests_total{job="api"}[5m]) > 100
        for: 1m
"#;

/// Three prefix-style expressions and one postfix-style outlier
pub const MIXED_STYLE_RULES: &str = r#"groups:
  - name: capacity
    rules:
      - record: job:node_cpu_seconds:rate5m
        expr: sum by (job) (rate(node_cpu_seconds_total[5m]))
      - record: job:node_network_receive_bytes:rate5m
        expr: sum by (job) (rate(node_network_receive_bytes_total[5m]))
      - record: job:node_network_transmit_bytes:rate5m
        expr: sum by (job) (rate(node_network_transmit_bytes_total[5m]))
      - record: job:node_disk_read_bytes:rate5m
        expr: sum(rate(node_disk_read_bytes_total[5m])) by (job)
"#;

/// Dashboard panels: `query:` fields, not a rule file
pub const DASHBOARD: &str = r#"panels:
  - title: Error ratio
    targets:
      - refId: A
        query: 'sum(rate(http_errors_total[5m])) by (service) / sum(rate(http_requests_total[5m])) by (service)'
  - title: Targets up
    targets:
      - refId: A
        query: up{job="node"}
"#;

/// Single-field documents and the expected outcome
pub const FIELD_CASES: &[DocumentCase] = &[
    DocumentCase::unchanged("expr: |\n  sum(rate(metric_total[5m]))", "already a block scalar"),
    DocumentCase::unchanged(r#"expr: up{job="test"}"#, "short expression"),
    DocumentCase::unchanged("# expr: sum(a) by (x) / sum(b) by (x)", "commented out"),
    DocumentCase::rewritten(
        r#"expr: sum(rate(http_requests_total{job="api",status=~"5.."}[5m])) by (instance) / sum(rate(http_requests_total{job="api"}[5m])) by (instance)"#,
        "long single-line expression",
    ),
    DocumentCase::rewritten(
        "    query: \"sum(a_total) by (x) / sum(b_total) by (x) or vector(0)\"",
        "double-quoted query",
    ),
    DocumentCase::flagged(
        r#"expr: "sum(rate(http_requests_total[5m])) by (instance) / sum(rate(http_requests_total[5m])) by (instance) or up{job=\"api\"}""#,
        "escaped quotes cannot be rewritten",
    ),
];
