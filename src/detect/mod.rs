//! Trailing-window extraction and severity classification.

pub mod engine;
pub mod rules;
pub mod window;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("date {date} not found in dataset")]
    DateNotFound { date: NaiveDate },

    #[error("problem_1 streak of {streak} day(s) exceeds the severity table (max {max})")]
    StreakOutOfRange { streak: usize, max: usize },

    #[error("cannot classify an empty window")]
    EmptyWindow,
}

/// Severity levels, declared in ascending order so `Critical` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Display precedence: most severe first.
    pub const DISPLAY_ORDER: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Moderate,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Moderate => "Moderate",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three monitored indicators, in rule-evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Indicator {
    #[serde(rename = "problem_0")]
    Problem0,
    #[serde(rename = "problem_1")]
    Problem1,
    #[serde(rename = "problem_2")]
    Problem2,
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indicator::Problem0 => write!(f, "problem_0"),
            Indicator::Problem1 => write!(f, "problem_1"),
            Indicator::Problem2 => write!(f, "problem_2"),
        }
    }
}

/// A positive result from one detection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub indicator: Indicator,
    pub severity: Severity,
    /// Streak length or report count; `None` for the instantaneous flag.
    pub evidence: Option<u32>,
}

impl Finding {
    /// Human-readable warning for the card list.
    pub fn message(&self, server: &str) -> String {
        match (self.indicator, self.evidence) {
            (Indicator::Problem1, Some(days)) => {
                format!("{} has had problem_1 status for {} day(s)", server, days)
            }
            (Indicator::Problem2, Some(count)) => {
                format!("{} has {} report(s) of problem_2 status", server, count)
            }
            (indicator, _) => format!("{} has {} status", server, indicator),
        }
    }
}
