//! Time-series dataset -- CSV loading and ordering validation.
//!
//! The dataset is loaded once at startup and shared read-only between
//! requests. Cloning a [`Dataset`] only bumps a reference count.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Column order of the source file, preserved in the table view.
pub const COLUMNS: [&str; 5] = ["date", "server", "problem_0", "problem_1", "problem_2"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to open dataset {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("row {row}: date {date} is not after previous date {previous}")]
    OutOfOrder {
        row: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// One day of error indicators for a single server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub server: String,
    #[serde(with = "flag")]
    pub problem_0: bool,
    #[serde(with = "flag")]
    pub problem_1: bool,
    pub problem_2: u32,
}

/// `0`/`1` columns, kept as integers on the wire.
mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(other.into()),
                &"0 or 1",
            )),
        }
    }
}

/// Immutable, date-sorted handle over the loaded rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[TimeSeriesRow]>,
}

impl Dataset {
    /// Build a dataset, rejecting rows whose dates are not strictly ascending.
    pub fn from_rows(rows: Vec<TimeSeriesRow>) -> Result<Self, DatasetError> {
        for (idx, pair) in rows.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(DatasetError::OutOfOrder {
                    row: idx + 2,
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
        }
        Ok(Self { rows: rows.into() })
    }

    /// Parse CSV records (with a header row) from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows: Vec<TimeSeriesRow> = Vec::new();
        for record in csv_reader.deserialize() {
            rows.push(record?);
        }
        Self::from_rows(rows)
    }

    /// Load the dataset file from disk.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(io::BufReader::new(file))?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            first = ?dataset.first_date(),
            last = ?dataset.last_date(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    pub fn rows(&self) -> &[TimeSeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// Index of the row for `date`, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        // Dates are strictly ascending, so a hit is unique.
        self.rows.binary_search_by_key(&date, |r| r.date).ok()
    }
}
