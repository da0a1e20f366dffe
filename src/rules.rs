//! Prometheus rule files.
//!
//! Some checks need to know which expression belongs to which rule, so the
//! document is also read as a rule file:
//!
//! ```yaml
//! groups:
//!   - name: api
//!     rules:
//!       - alert: HighErrorRate
//!         expr: rate(http_errors_total[5m]) > 0.1
//!         for: 10m
//! ```
//!
//! Documents that do not deserialize this way are not rule files and get no
//! rule-level checks.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_norway::Value;
use tracing::debug;

use crate::error::Result;
use crate::issue::{Issue, IssueKind};
use crate::lexer::duration::{bracketed_duration, duration};
use crate::lexer::scan::{TokenKind, tokenize};
use crate::validate::recording::check_recording_rule_name;

/// Top level of a rule file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFile {
    pub groups: Vec<RuleGroup>,
}

/// A named group of rules evaluated together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleGroup {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub interval: String,
    pub rules: Vec<Rule>,
}

/// An alerting rule (`alert`) or a recording rule (`record`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    #[serde(deserialize_with = "scalar_string")]
    pub alert: String,
    #[serde(deserialize_with = "scalar_string")]
    pub record: String,
    #[serde(deserialize_with = "scalar_string")]
    pub expr: String,
    /// Pending duration before an alert fires
    #[serde(rename = "for", deserialize_with = "scalar_string")]
    pub for_duration: String,
    pub labels: BTreeMap<String, Value>,
    pub annotations: BTreeMap<String, Value>,
}

/// Accept any YAML scalar as a string: `for: 0` and `expr: 1` are valid
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

impl RuleFile {
    /// Deserialize a rule file from YAML
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_promql_fmt::rules::RuleFile;
    ///
    /// let file = RuleFile::from_yaml_str("groups:\n  - name: g\n    rules:\n      - record: job:up:sum\n        expr: sum(up) by (job)\n").unwrap();
    /// assert_eq!(file.groups[0].rules[0].record, "job:up:sum");
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_norway::from_str(content)?)
    }

    /// All rules of all groups, in file order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.groups.iter().flat_map(|g| g.rules.iter())
    }
}

impl Rule {
    pub fn is_alert(&self) -> bool {
        !self.alert.is_empty()
    }

    pub fn is_recording(&self) -> bool {
        !self.record.is_empty()
    }

    /// Whether the rule waits before firing. `0s` and an absent `for` do not.
    /// A value that is not a duration counts as set.
    pub fn has_pending_duration(&self) -> bool {
        let value = self.for_duration.trim();
        if value.is_empty() {
            return false;
        }
        match duration(value) {
            Ok(("", d)) => !d.is_zero(),
            _ => true,
        }
    }
}

/// Range durations written in an expression, e.g. `5m` from `x[5m]`.
/// Subquery ranges (`[1h:5m]`) and template variables are not included.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::rules::range_durations;
///
/// assert_eq!(
///     range_durations(r#"rate(x[5m]) / rate(y{a="[1m]"}[1h30m]) + max_over_time(z[1h:5m])"#),
///     vec!["5m", "1h30m"]
/// );
/// ```
pub fn range_durations(expr: &str) -> Vec<&str> {
    tokenize(expr)
        .iter()
        .filter(|tok| tok.kind == TokenKind::LBracket)
        .filter_map(|tok| bracketed_duration(&expr[tok.offset..]).ok())
        .map(|(_, (raw, _))| raw)
        .collect()
}

fn hysteresis_issue(rule: &Rule) -> Option<Issue> {
    if !rule.is_alert() || !rule.has_pending_duration() {
        return None;
    }

    let durations = range_durations(&rule.expr);
    if durations.is_empty() {
        return None;
    }

    Some(Issue::new(
        IssueKind::AlertHysteresis,
        format!(
            "Alert '{}' has both a 'for: {}' clause (hysteresis) and duration(s) [{}] in the expression - consider removing the duration as the sliding window may interact poorly with hysteresis",
            rule.alert,
            rule.for_duration,
            durations.join(" ")
        ),
    ))
}

/// Rule-level checks: alert hysteresis and recording rule names.
///
/// Returns no issues when the content is not a rule file.
pub fn check_rule_file(content: &str) -> Vec<Issue> {
    let file = match RuleFile::from_yaml_str(content) {
        Ok(file) => file,
        Err(e) => {
            debug!(error = %e, "not a rule file, skipping rule checks");
            return Vec::new();
        }
    };

    let mut issues = Vec::new();
    for rule in file.rules() {
        issues.extend(hysteresis_issue(rule));
        if rule.is_recording() {
            issues.extend(check_recording_rule_name(&rule.record));
        }
    }

    debug!(
        groups = file.groups.len(),
        issues = issues.len(),
        "rule file checked"
    );
    issues
}
