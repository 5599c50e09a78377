//! Document grading: maps a severity snapshot to a 1-5 score

use crate::domain::report::{Grade, GradeColor};

/// Compute the overall document grade from one consistent severity snapshot.
///
/// Ordered decision table, first match wins:
///
/// | # | condition                              | score | color   |
/// |---|----------------------------------------|-------|---------|
/// | 1 | high == 0, medium == 0, low <= 3       | 5     | success |
/// | 2 | high == 0, medium <= 3, low <= 10      | 4     | success |
/// | 3 | high == 0, medium <= 10                | 3     | warning |
/// | 4 | high <= 5                              | 2     | error   |
/// | 5 | otherwise                              | 1     | error   |
///
/// Total over all non-negative inputs; never panics. Callers must pass counts
/// taken from a single snapshot, never a mix of pre- and post-correction
/// numbers.
pub fn compute_grade(_total: usize, high: usize, medium: usize, low: usize) -> Grade {
    if high == 0 && medium == 0 && low <= 3 {
        return Grade {
            score: 5,
            label: "Excellent, no deviations found".to_string(),
            color: GradeColor::Success,
        };
    }
    if high == 0 && medium <= 3 && low <= 10 {
        return Grade {
            score: 4,
            label: "Good, minor issues".to_string(),
            color: GradeColor::Success,
        };
    }
    if high == 0 && medium <= 10 {
        return Grade {
            score: 3,
            label: "Fair, needs attention".to_string(),
            color: GradeColor::Warning,
        };
    }
    if high <= 5 {
        return Grade {
            score: 2,
            label: "Poor, rework required".to_string(),
            color: GradeColor::Error,
        };
    }
    Grade {
        score: 1,
        label: "Very poor, major rework required".to_string(),
        color: GradeColor::Error,
    }
}
