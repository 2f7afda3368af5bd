use crate::dataset::Dataset;
use crate::detect::rules::{flag_rule, magnitude_rule, streak_rule};
use crate::detect::window::{trailing_window, Window, DEFAULT_TRAILING_DAYS};
use crate::detect::{DetectError, Severity};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Warnings grouped by severity. Groups appear in the order their first
/// finding was recorded; messages within a group keep rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedWarnings {
    groups: Vec<(Severity, Vec<String>)>,
}

impl CategorizedWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: String) {
        match self.groups.iter_mut().find(|(s, _)| *s == severity) {
            Some((_, messages)) => messages.push(message),
            None => self.groups.push((severity, vec![message])),
        }
    }

    pub fn get(&self, severity: Severity) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(s, _)| *s == severity)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of warnings across all severities.
    pub fn count(&self) -> usize {
        self.groups.iter().map(|(_, m)| m.len()).sum()
    }

    /// Sort into display order (Critical first), or the no-problems state.
    pub fn into_summary(mut self) -> Summary {
        if self.groups.is_empty() {
            return Summary::NoProblems;
        }
        self.groups.sort_by(|a, b| b.0.cmp(&a.0));
        Summary::Warnings {
            groups: self
                .groups
                .into_iter()
                .map(|(severity, warnings)| SeverityGroup { severity, warnings })
                .collect(),
        }
    }
}

/// One severity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityGroup {
    pub severity: Severity,
    pub warnings: Vec<String>,
}

/// Classification outcome in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Summary {
    NoProblems,
    Warnings { groups: Vec<SeverityGroup> },
}

impl Summary {
    pub fn groups(&self) -> &[SeverityGroup] {
        match self {
            Summary::NoProblems => &[],
            Summary::Warnings { groups } => groups,
        }
    }

    pub fn is_no_problems(&self) -> bool {
        matches!(self, Summary::NoProblems)
    }

    /// Most severe level present, if any.
    pub fn highest(&self) -> Option<Severity> {
        self.groups().first().map(|g| g.severity)
    }
}

/// Run every rule over the window and collect warnings by severity.
pub fn categorize(window: &Window) -> Result<CategorizedWarnings, DetectError> {
    let server = window.latest().server.as_str();
    let findings = [flag_rule(window), streak_rule(window)?, magnitude_rule(window)];

    let mut warnings = CategorizedWarnings::new();
    for finding in findings.into_iter().flatten() {
        debug!(
            indicator = %finding.indicator,
            severity = %finding.severity,
            evidence = ?finding.evidence,
            "Rule fired"
        );
        warnings.push(finding.severity, finding.message(server));
    }
    Ok(warnings)
}

/// Categorize and order in one step.
pub fn classify(window: &Window) -> Result<Summary, DetectError> {
    Ok(categorize(window)?.into_summary())
}

/// Window plus its classification for one selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub window: Window,
    pub summary: Summary,
}

/// Request-level entry point: dataset handle plus window size.
#[derive(Debug, Clone)]
pub struct SeverityEngine {
    dataset: Dataset,
    trailing_days: usize,
}

impl SeverityEngine {
    pub fn new(dataset: Dataset, trailing_days: usize) -> Self {
        Self {
            dataset,
            trailing_days,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn trailing_days(&self) -> usize {
        self.trailing_days
    }

    /// Evaluate `date` with the engine's configured window size.
    pub fn evaluate(&self, date: NaiveDate) -> Result<Evaluation, DetectError> {
        self.evaluate_with(date, self.trailing_days)
    }

    /// Evaluate `date` with an explicit window size.
    pub fn evaluate_with(
        &self,
        date: NaiveDate,
        trailing_days: usize,
    ) -> Result<Evaluation, DetectError> {
        let window = trailing_window(&self.dataset, date, trailing_days)?;
        let summary = classify(&window)?;

        info!(
            %date,
            rows = window.len(),
            highest = ?summary.highest(),
            "Classified window"
        );
        Ok(Evaluation { window, summary })
    }
}

impl From<Dataset> for SeverityEngine {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset, DEFAULT_TRAILING_DAYS)
    }
}
