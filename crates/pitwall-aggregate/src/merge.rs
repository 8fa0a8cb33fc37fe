//! Multi-driver lap-time merging.

use pitwall_types::{LapRecord, PitwallError, Result};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// One row of a [`MergedLapTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapRow {
    /// Lap number.
    #[serde(rename = "lap")]
    pub lap_number: u32,
    /// Lap time in seconds per driver; `None` when the lap has no time.
    #[serde(flatten)]
    pub times: BTreeMap<String, Option<f64>>,
}

impl LapRow {
    /// Returns the lap time of `driver`, if one was recorded.
    #[must_use]
    pub fn time(&self, driver: &str) -> Option<f64> {
        self.times.get(driver).copied().flatten()
    }
}

/// Sparse table of lap times keyed by lap number, one column per driver.
///
/// Rows are kept in first-sight order: a lap number seen for the first time
/// appends a row, a lap number seen again updates the existing row in place.
/// Rows are never removed or renumbered.
///
/// Serializes as an array of `{"lap": n, "<driver>": seconds, ...}` objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedLapTable {
    rows: Vec<LapRow>,
    index: HashMap<u32, usize>,
}

impl MergedLapTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one driver's laps into the table.
    pub fn insert_laps(&mut self, driver: &str, laps: &[LapRecord]) {
        for lap in laps {
            self.insert(driver, lap.lap_number, lap.lap_duration);
        }
    }

    /// Sets the lap time of `driver` on lap `lap_number`.
    pub fn insert(&mut self, driver: &str, lap_number: u32, time: Option<f64>) {
        if let Some(&row) = self.index.get(&lap_number) {
            self.rows[row].times.insert(driver.to_string(), time);
        } else {
            self.index.insert(lap_number, self.rows.len());
            self.rows.push(LapRow {
                lap_number,
                times: BTreeMap::from([(driver.to_string(), time)]),
            });
        }
    }

    /// Returns the rows in first-sight order.
    #[must_use]
    pub fn rows(&self) -> &[LapRow] {
        &self.rows
    }

    /// Returns the row for `lap_number`, if present.
    #[must_use]
    pub fn row(&self, lap_number: u32) -> Option<&LapRow> {
        self.index.get(&lap_number).map(|&i| &self.rows[i])
    }

    /// Returns the rows ordered by lap number.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<&LapRow> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_by_key(|row| row.lap_number);
        rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Merges every successful driver and reports the failed ones.
    #[must_use]
    pub fn merge_best_effort(outcomes: impl IntoIterator<Item = DriverLaps>) -> LapMergeReport {
        let mut table = Self::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match outcome.result {
                Ok(laps) => table.insert_laps(&outcome.driver, &laps),
                Err(error) => failures.push(DriverFailure {
                    driver: outcome.driver,
                    error,
                }),
            }
        }

        LapMergeReport { table, failures }
    }
}

impl Serialize for MergedLapTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

/// The outcome of fetching one driver's laps.
#[derive(Debug)]
pub struct DriverLaps {
    /// Driver identifier as requested.
    pub driver: String,
    /// The driver's laps, or why they could not be fetched.
    pub result: Result<Vec<LapRecord>>,
}

/// A driver whose laps could not be fetched.
#[derive(Debug)]
pub struct DriverFailure {
    /// Driver identifier as requested.
    pub driver: String,
    /// The fetch error.
    pub error: PitwallError,
}

/// Result of a best-effort merge: the table plus the drivers left out of it.
#[derive(Debug)]
pub struct LapMergeReport {
    /// Table built from every successful driver.
    pub table: MergedLapTable,
    /// Drivers whose fetch failed, in request order.
    pub failures: Vec<DriverFailure>,
}

impl LapMergeReport {
    /// Returns true if every driver was merged.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the identifiers of the failed drivers.
    pub fn failed_drivers(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.driver.as_str())
    }
}
