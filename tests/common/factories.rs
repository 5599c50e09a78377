//! Test data factories

use normcheck::domain::report::{CheckPayload, Issue, RawCheckResults};

/// Build an issue with the given kind, severity and location.
pub fn issue(kind: &str, severity: &str, location: &str) -> Issue {
    Issue {
        kind: kind.to_string(),
        description: format!("{} deviates from the standard", kind),
        location: location.to_string(),
        severity: severity.to_string(),
        auto_fixable: true,
    }
}

/// Build an issue with an explicit description and auto-fixable flag.
pub fn issue_with(
    kind: &str,
    description: &str,
    severity: &str,
    location: &str,
    auto_fixable: bool,
) -> Issue {
    Issue {
        kind: kind.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        severity: severity.to_string(),
        auto_fixable,
    }
}

/// Wrap an issue list into raw check results.
pub fn check_results(issues: Vec<Issue>) -> RawCheckResults {
    RawCheckResults {
        issues: Some(issues),
        ..Default::default()
    }
}

/// Build an analyzer payload carrying only original check results.
pub fn payload(issues: Vec<Issue>) -> CheckPayload {
    CheckPayload {
        check_results: Some(check_results(issues)),
        ..Default::default()
    }
}

/// The worked three-issue example from the engine contract.
pub fn worked_example_issues() -> Vec<Issue> {
    vec![
        issue_with("font_size", "Wrong size", "high", "p.1", true),
        issue_with("font_size", "Wrong size", "high", "p.5", true),
        issue_with("margins_left", "Wrong margin", "medium", "p.1", false),
    ]
}
