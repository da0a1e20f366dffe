// Test helper macros and utilities for analyzer tests
// These macros provide consistent patterns for checking issue lists

/// Issue kinds of a list of issues, in order
#[macro_export]
macro_rules! issue_kinds {
    ($issues:expr) => {{
        $issues
            .iter()
            .map(|issue| issue.kind)
            .collect::<Vec<rusty_promql_fmt::IssueKind>>()
    }};
}

/// Assert that at least one issue of the given kind was reported
#[macro_export]
macro_rules! assert_has_issue {
    ($issues:expr, $kind:expr) => {{
        let issues = &$issues;
        assert!(
            issues.iter().any(|issue| issue.kind == $kind),
            "Expected a {:?} issue, got: {:#?}",
            $kind,
            issues
        );
    }};
    ($issues:expr, $kind:expr, $message_contains:expr) => {{
        let issues = &$issues;
        assert!(
            issues
                .iter()
                .any(|issue| issue.kind == $kind && issue.message.contains($message_contains)),
            "Expected a {:?} issue containing '{}', got: {:#?}",
            $kind,
            $message_contains,
            issues
        );
    }};
}

/// Assert that no issue of the given kind was reported
#[macro_export]
macro_rules! assert_no_issue {
    ($issues:expr, $kind:expr) => {{
        let issues = &$issues;
        assert!(
            !issues.iter().any(|issue| issue.kind == $kind),
            "Expected no {:?} issue, got: {:#?}",
            $kind,
            issues
        );
    }};
}

/// A YAML document and what analyzing it should produce
#[derive(Debug, Clone)]
pub struct DocumentCase {
    pub document: &'static str,
    pub expect_issues: bool,
    pub expect_changed: bool,
    pub description: &'static str,
}

impl DocumentCase {
    pub const fn unchanged(document: &'static str, description: &'static str) -> Self {
        Self {
            document,
            expect_issues: false,
            expect_changed: false,
            description,
        }
    }

    pub const fn flagged(document: &'static str, description: &'static str) -> Self {
        Self {
            document,
            expect_issues: true,
            expect_changed: false,
            description,
        }
    }

    pub const fn rewritten(document: &'static str, description: &'static str) -> Self {
        Self {
            document,
            expect_issues: true,
            expect_changed: true,
            description,
        }
    }
}
