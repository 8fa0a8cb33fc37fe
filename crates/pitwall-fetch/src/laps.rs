//! Multi-driver lap-time tables.

use futures::stream::{self, Stream, StreamExt};
use pitwall_aggregate::{DriverLaps, LapMergeReport, MergedLapTable};
use pitwall_types::{LapRecord, Result};
use std::pin::pin;
use tracing::{debug, instrument, warn};

use crate::OpenF1Client;
use crate::url::{Endpoint, Query};

impl OpenF1Client {
    /// Fetches every lap of one driver in a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_laps(&self, session_key: u32, driver: &str) -> Result<Vec<LapRecord>> {
        let query = Query::new()
            .eq("session_key", session_key)
            .eq("driver_number", driver);
        self.get(Endpoint::Laps, &query).await
    }

    /// Creates a stream of per-driver lap fetches.
    ///
    /// Drivers are fetched one at a time in the order given; the next request
    /// is only issued once the stream is polled past the previous outcome.
    pub fn driver_laps<'a, S>(
        &'a self,
        session_key: u32,
        drivers: &'a [S],
    ) -> impl Stream<Item = DriverLaps> + 'a
    where
        S: AsRef<str> + Sync,
    {
        stream::iter(drivers).then(move |driver| async move {
            let driver = driver.as_ref();
            DriverLaps {
                driver: driver.to_string(),
                result: self.fetch_laps(session_key, driver).await,
            }
        })
    }

    /// Merges the lap times of several drivers into one table.
    ///
    /// Rows appear in the order lap numbers are first seen across the drivers,
    /// with one column per driver.
    ///
    /// # Errors
    ///
    /// Fails as soon as one driver's fetch fails; the remaining drivers are
    /// not requested and no partial table is returned.
    #[instrument(skip(self, drivers), fields(drivers = drivers.len()))]
    pub async fn merge_lap_times<S>(&self, session_key: u32, drivers: &[S]) -> Result<MergedLapTable>
    where
        S: AsRef<str> + Sync,
    {
        let mut table = MergedLapTable::new();
        let mut outcomes = pin!(self.driver_laps(session_key, drivers));

        while let Some(outcome) = outcomes.next().await {
            let laps = outcome.result?;
            debug!(driver = %outcome.driver, laps = laps.len(), "merging laps");
            table.insert_laps(&outcome.driver, &laps);
        }

        Ok(table)
    }

    /// Merges the lap times of every driver that could be fetched.
    ///
    /// Each driver's fetch is isolated: failures are collected in the report
    /// instead of aborting the merge.
    #[instrument(skip(self, drivers), fields(drivers = drivers.len()))]
    pub async fn merge_lap_times_best_effort<S>(
        &self,
        session_key: u32,
        drivers: &[S],
    ) -> LapMergeReport
    where
        S: AsRef<str> + Sync,
    {
        let outcomes: Vec<DriverLaps> = self.driver_laps(session_key, drivers).collect().await;
        let report = MergedLapTable::merge_best_effort(outcomes);

        for failure in &report.failures {
            warn!(driver = %failure.driver, error = %failure.error, "leaving driver out of lap table");
        }
        report
    }
}
