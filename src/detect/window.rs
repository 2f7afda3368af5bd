use crate::dataset::{Dataset, TimeSeriesRow};
use crate::detect::DetectError;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Number of days before the selected date included in a window.
pub const DEFAULT_TRAILING_DAYS: usize = 3;

/// A non-empty run of consecutive rows ending at the selected date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Window {
    rows: Vec<TimeSeriesRow>,
}

impl Window {
    /// Wrap an already-sliced run of rows, oldest first.
    pub fn from_rows(rows: Vec<TimeSeriesRow>) -> Result<Self, DetectError> {
        if rows.is_empty() {
            return Err(DetectError::EmptyWindow);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TimeSeriesRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row for the selected date.
    pub fn latest(&self) -> &TimeSeriesRow {
        // Non-empty by construction.
        &self.rows[self.rows.len() - 1]
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.latest().date
    }

    /// Index of the selected row, used for highlighting in the table view.
    pub fn selected_index(&self) -> usize {
        self.rows.len() - 1
    }

    /// Rows from newest to oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = &TimeSeriesRow> {
        self.rows.iter().rev()
    }
}

/// Slice the trailing window ending at `date` (inclusive), clipped at the
/// start of the dataset. The returned window owns a copy of its rows.
pub fn trailing_window(
    dataset: &Dataset,
    date: NaiveDate,
    trailing_days: usize,
) -> Result<Window, DetectError> {
    let position = dataset
        .position(date)
        .ok_or(DetectError::DateNotFound { date })?;
    let start = position.saturating_sub(trailing_days);

    debug!(%date, position, start, trailing_days, "Slicing trailing window");

    Ok(Window {
        rows: dataset.rows()[start..=position].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(days: u32) -> Dataset {
        let rows = (1..=days)
            .map(|d| TimeSeriesRow {
                date: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
                server: "server_0".to_string(),
                problem_0: false,
                problem_1: d % 2 == 0,
                problem_2: d,
            })
            .collect();
        Dataset::from_rows(rows).unwrap()
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    #[test]
    fn test_full_window() {
        let ds = dataset(10);
        let w = trailing_window(&ds, jan(6), 3).unwrap();
        assert_eq!(w.len(), 4);
        let dates: Vec<_> = w.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![jan(3), jan(4), jan(5), jan(6)]);
        assert_eq!(w.selected_date(), jan(6));
        assert_eq!(w.selected_index(), 3);
    }

    #[test]
    fn test_window_clipped_at_start() {
        let ds = dataset(10);
        let w = trailing_window(&ds, jan(2), 3).unwrap();
        assert_eq!(w.len(), 2);
        assert_eq!(w.rows()[0].date, jan(1));
    }

    #[test]
    fn test_first_date_single_row() {
        let ds = dataset(10);
        for trailing in [0, 1, 3, 30] {
            let w = trailing_window(&ds, jan(1), trailing).unwrap();
            assert_eq!(w.len(), 1);
            assert_eq!(w.selected_date(), jan(1));
        }
    }

    #[test]
    fn test_zero_trailing_days() {
        let ds = dataset(10);
        let w = trailing_window(&ds, jan(7), 0).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(w.latest().problem_2, 7);
    }

    #[test]
    fn test_missing_date() {
        let ds = dataset(10);
        let err = trailing_window(&ds, jan(20), 3).unwrap_err();
        assert_eq!(err, DetectError::DateNotFound { date: jan(20) });
    }

    #[test]
    fn test_newest_first() {
        let ds = dataset(5);
        let w = trailing_window(&ds, jan(5), 2).unwrap();
        let values: Vec<_> = w.newest_first().map(|r| r.problem_2).collect();
        assert_eq!(values, vec![5, 4, 3]);
    }

    #[test]
    fn test_empty_window_rejected() {
        assert_eq!(Window::from_rows(Vec::new()), Err(DetectError::EmptyWindow));
    }
}
