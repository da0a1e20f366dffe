//! Findings reported by the analyzer.

use std::fmt;

use serde::Serialize;

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Same grouping clause repeated on both operands of a binary operator
    RedundantClause,
    /// Grouping clause on an operand other than the last one
    MisplacedClause,
    /// Expression should be written over several lines
    Multiline,
    /// Clause placement differs from the rest of the document
    InconsistentStyle,
    MetricNaming,
    MetricSuffix,
    /// Questionable function use, e.g. `rate()` over a gauge or unguarded division
    Instrumentation,
    LabelNaming,
    RecordingRule,
    /// Alert with both a `for:` clause and a range window in its expression
    AlertHysteresis,
}

/// A single advisory finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
