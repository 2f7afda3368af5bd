//! The three detection rules, one per indicator.
//!
//! Each rule looks at the window and either reports nothing or a single
//! [`Finding`]. Only the streak rule reads history; the other two inspect
//! the selected day alone.

use crate::detect::window::Window;
use crate::detect::{DetectError, Finding, Indicator, Severity};

/// Streak length -> severity. Index 0 is a one-day streak.
const STREAK_SEVERITY: [Severity; 4] = [
    Severity::Low,
    Severity::Moderate,
    Severity::High,
    Severity::Critical,
];

/// problem_0: any flag on the selected day is critical.
pub fn flag_rule(window: &Window) -> Option<Finding> {
    window.latest().problem_0.then_some(Finding {
        indicator: Indicator::Problem0,
        severity: Severity::Critical,
        evidence: None,
    })
}

/// problem_1: severity grows with the number of consecutive flagged days
/// ending at the selected day.
pub fn streak_rule(window: &Window) -> Result<Option<Finding>, DetectError> {
    let streak = window.newest_first().take_while(|r| r.problem_1).count();
    if streak == 0 {
        return Ok(None);
    }

    let severity = streak_severity(streak)?;
    Ok(Some(Finding {
        indicator: Indicator::Problem1,
        severity,
        evidence: Some(streak as u32),
    }))
}

/// problem_2: banded on the selected day's report count.
pub fn magnitude_rule(window: &Window) -> Option<Finding> {
    let count = window.latest().problem_2;
    magnitude_severity(count).map(|severity| Finding {
        indicator: Indicator::Problem2,
        severity,
        evidence: Some(count),
    })
}

fn streak_severity(streak: usize) -> Result<Severity, DetectError> {
    streak
        .checked_sub(1)
        .and_then(|idx| STREAK_SEVERITY.get(idx))
        .copied()
        .ok_or(DetectError::StreakOutOfRange {
            streak,
            max: STREAK_SEVERITY.len(),
        })
}

fn magnitude_severity(count: u32) -> Option<Severity> {
    match count {
        0 => None,
        1..=3 => Some(Severity::Low),
        4..=6 => Some(Severity::Moderate),
        7..=9 => Some(Severity::High),
        _ => Some(Severity::Critical),
    }
}
