//! Dashboard view models and plain-text rendering.

use crate::dataset::{Dataset, TimeSeriesRow, COLUMNS};
use crate::detect::engine::{Evaluation, Summary};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Everything a front end needs to draw one date selection.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub date: NaiveDate,
    pub display_date: String,
    pub trailing_days: usize,
    pub table: TableView,
    pub summary: Summary,
}

/// Window rows in source column order; `selected_index` is the highlighted row.
#[derive(Debug, Serialize)]
pub struct TableView {
    pub columns: [&'static str; 5],
    pub rows: Vec<TimeSeriesRow>,
    pub selected_index: usize,
}

impl DashboardView {
    pub fn new(evaluation: Evaluation, trailing_days: usize) -> Self {
        let Evaluation { window, summary } = evaluation;
        let date = window.selected_date();
        let selected_index = window.selected_index();
        Self {
            date,
            display_date: display_date(date),
            trailing_days,
            table: TableView {
                columns: COLUMNS,
                rows: window.into_rows(),
                selected_index,
            },
            summary,
        }
    }
}

/// A selectable date on the slider. Every other date carries a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderMark {
    pub date: NaiveDate,
    /// Seconds since the Unix epoch at midnight UTC.
    pub timestamp: i64,
    pub label: String,
}

pub fn slider_marks(dataset: &Dataset) -> Vec<SliderMark> {
    dataset
        .dates()
        .enumerate()
        .map(|(i, date)| SliderMark {
            date,
            timestamp: date.and_time(NaiveTime::MIN).and_utc().timestamp(),
            label: if i % 2 == 0 {
                date.format("%d").to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

/// "Jan 05, 2020"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Render the window as a fixed-width table, marking the selected row.
pub fn format_table(rows: &[TimeSeriesRow], selected_index: usize) -> String {
    let mut out = format!(
        "  {:<10} | {:<10} | {:>9} | {:>9} | {:>9}\n",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
    );
    out.push_str(&format!(
        "  {:-<10}-|-{:-<10}-|-{:-<9}-|-{:-<9}-|-{:-<9}\n",
        "", "", "", "", ""
    ));
    for (i, row) in rows.iter().enumerate() {
        let marker = if i == selected_index { '>' } else { ' ' };
        out.push_str(&format!(
            "{} {:<10} | {:<10} | {:>9} | {:>9} | {:>9}\n",
            marker,
            row.date,
            row.server,
            u8::from(row.problem_0),
            u8::from(row.problem_1),
            row.problem_2
        ));
    }
    out
}

/// Render the severity cards as text.
pub fn format_summary(summary: &Summary) -> String {
    match summary {
        Summary::NoProblems => "No problems found!\n".to_string(),
        Summary::Warnings { groups } => {
            let mut out = String::new();
            for group in groups {
                out.push_str(&format!("=== {} ===\n", group.severity));
                for warning in &group.warnings {
                    out.push_str(&format!(" - {}\n", warning));
                }
            }
            out
        }
    }
}
