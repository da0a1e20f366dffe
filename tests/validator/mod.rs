// Best-practice test cases
//
// Metric names, label names and expressions with the findings they should
// (or should not) produce.

/// Metric names that pass every naming and suffix check
pub const WELL_NAMED_METRICS: &[&str] = &[
    "http_requests_total",
    "http_request_duration_seconds",
    "process_resident_memory_bytes",
    "node_cpu_seconds_total",
    "job:node_cpu_seconds:rate5m",
    "queue_depth",
    "up",
];

/// Metric names with a non-base unit, and the base unit to use instead
pub const NON_BASE_UNIT_METRICS: &[(&str, &str)] = &[
    ("http_duration_milliseconds", "_seconds"),
    ("gc_pause_microseconds", "_seconds"),
    ("job_runtime_minutes", "_seconds"),
    ("cache_size_megabytes", "_bytes"),
    ("disk_free_gigabytes", "_bytes"),
    ("request_latency_ms", "_seconds"),
    ("heap_size_kb", "_bytes"),
];

/// Metric names that read as counters but lack `_total`
pub const COUNTERS_WITHOUT_TOTAL: &[&str] = &[
    "http_requests",
    "rpc_errors",
    "login_failures",
    "messages_received",
    "jobs_processed_count",
];

/// Label names and the number of findings for each
pub const LABEL_NAMES: &[(&str, usize)] = &[
    ("job", 0),
    ("instance", 0),
    ("status_code", 0),
    ("_internal", 1),
    ("__name__", 1),
    ("type", 1),
];

/// Divisions with no zero guard
pub const UNGUARDED_DIVISIONS: &[&str] = &[
    "sum(a) / sum(b)",
    "a/b",
    "rate(errors_total[5m]) / rate(requests_total[5m]) > 0.1",
];

/// Divisions with an `or` fallback or a `!= 0` guard, and expressions that
/// do not divide
pub const GUARDED_DIVISIONS: &[&str] = &[
    "sum(a) / sum(b) or 0",
    "sum(a) / sum(b) OR vector(1)",
    "sum(a) / (sum(b) != 0)",
    "sum(a) * sum(b)",
    r#"http_requests_total{path="/api/v1"}"#,
];

/// Expressions with no best-practice findings
pub const CLEAN_EXPRESSIONS: &[&str] = &[
    r#"sum(rate(http_requests_total{job="api"}[5m]))"#,
    r#"up{job="node"} == 0"#,
    r#"histogram_quantile(0.99, sum by (le) (rate(http_request_duration_seconds_bucket[5m])))"#,
    r#"sum(rate(http_requests_total{code=~"5.."}[5m])) / sum(rate(http_requests_total[5m])) or vector(0)"#,
    "rate(node_cpu_seconds_total[$__rate_interval])",
];
