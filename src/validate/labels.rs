//! Label name conventions for names used in matchers.

use nom::{Parser, combinator::eof};

use crate::issue::{Issue, IssueKind};
use crate::lexer::identifier::label_name;

/// Names too vague to tell what they distinguish
const GENERIC_LABELS: [&str; 1] = ["type"];

fn is_valid_label_name(name: &str) -> bool {
    (label_name, eof).parse(name).is_ok()
}

/// Check one label name.
///
/// # Examples
///
/// ```
/// use rusty_promql_fmt::validate::labels::check_label_name;
///
/// assert!(check_label_name("job").is_empty());
/// assert_eq!(check_label_name("_internal").len(), 1);
/// assert_eq!(check_label_name("__name__").len(), 1);
/// ```
pub fn check_label_name(name: &str) -> Vec<Issue> {
    if !is_valid_label_name(name) {
        return vec![Issue::new(
            IssueKind::LabelNaming,
            format!(
                "Label name '{}' should only contain alphanumeric characters and underscores, and must not start with a digit",
                name
            ),
        )];
    }

    let mut issues = Vec::new();

    if name.starts_with("__") {
        issues.push(Issue::new(
            IssueKind::LabelNaming,
            format!(
                "Label name '{}' uses double leading underscores which are reserved for internal Prometheus use",
                name
            ),
        ));
    } else if name.starts_with('_') {
        issues.push(Issue::new(
            IssueKind::LabelNaming,
            format!(
                "Label name '{}' should not start with an underscore (reserved for internal use)",
                name
            ),
        ));
    }

    if GENERIC_LABELS.contains(&name) {
        issues.push(Issue::new(
            IssueKind::LabelNaming,
            format!(
                "Label name '{}' is too generic and should be avoided. Consider using a more specific name",
                name
            ),
        ));
    }

    issues
}

/// Check every distinct label name, in order
pub fn check_label_names<S: AsRef<str>>(names: &[S]) -> Vec<Issue> {
    names
        .iter()
        .flat_map(|name| check_label_name(name.as_ref()))
        .collect()
}
