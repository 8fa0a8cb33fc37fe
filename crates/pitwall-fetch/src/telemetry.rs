//! Per-lap telemetry series.

use pitwall_aggregate::{TelemetryAssembler, attach_locations, project};
use pitwall_types::{
    CarDataSample, LapRecord, LapWindow, LocationSample, Metric, MetricSeries, PitwallError,
    RawTelemetrySample, Result,
};
use tracing::{debug, instrument};

use crate::OpenF1Client;
use crate::url::{Endpoint, Query};

impl OpenF1Client {
    /// Fetches one driver's record for a single lap.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::NotFound`] if the lap does not exist.
    pub async fn fetch_lap(
        &self,
        session_key: u32,
        driver: &str,
        lap_number: u32,
    ) -> Result<LapRecord> {
        self.find_lap(session_key, driver, lap_number)
            .await?
            .ok_or_else(|| lap_not_found(session_key, driver, lap_number))
    }

    /// Returns the time span of a driver's lap.
    ///
    /// A lap without a recorded duration (the opening lap of a race, laps
    /// under red flag) ends where the driver's next lap starts.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::NotFound`] if the lap does not exist, has no
    /// start time, or has neither a duration nor a following lap.
    pub async fn fetch_lap_window(
        &self,
        session_key: u32,
        driver: &str,
        lap_number: u32,
    ) -> Result<LapWindow> {
        let lap = self.fetch_lap(session_key, driver, lap_number).await?;
        if let Some(window) = lap.window() {
            return Ok(window);
        }

        let Some(start) = lap.date_start else {
            return Err(lap_not_found(session_key, driver, lap_number));
        };
        let Some(next_number) = lap_number.checked_add(1) else {
            return Err(lap_not_found(session_key, driver, lap_number));
        };

        debug!(session_key, driver, lap_number, "lap has no duration, bounding by next lap");
        self.find_lap(session_key, driver, next_number)
            .await?
            .and_then(|next| next.date_start)
            .and_then(|end| LapWindow::new(start, end))
            .ok_or_else(|| lap_not_found(session_key, driver, lap_number))
    }

    /// Fetches a lap record if the driver completed that lap.
    async fn find_lap(
        &self,
        session_key: u32,
        driver: &str,
        lap_number: u32,
    ) -> Result<Option<LapRecord>> {
        let query = Query::new()
            .eq("session_key", session_key)
            .eq("driver_number", driver)
            .eq("lap_number", lap_number);
        let laps: Vec<LapRecord> = self.get(Endpoint::Laps, &query).await?;
        Ok(laps.into_iter().next())
    }

    /// Fetches the car samples of a driver within a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_car_data(
        &self,
        session_key: u32,
        driver: &str,
        window: &LapWindow,
    ) -> Result<Vec<CarDataSample>> {
        self.get(Endpoint::CarData, &window_query(session_key, driver, window))
            .await
    }

    /// Fetches the location samples of a driver within a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_locations(
        &self,
        session_key: u32,
        driver: &str,
        window: &LapWindow,
    ) -> Result<Vec<LocationSample>> {
        self.get(Endpoint::Location, &window_query(session_key, driver, window))
            .await
    }

    /// Fetches a lap's raw samples with derived distance.
    ///
    /// When `with_location` is set, the location feed for the same window is
    /// fetched too and joined onto the samples.
    ///
    /// # Errors
    ///
    /// Fails if the lap cannot be found or any request fails.
    pub async fn fetch_raw_telemetry(
        &self,
        session_key: u32,
        driver: &str,
        lap_number: u32,
        with_location: bool,
    ) -> Result<Vec<RawTelemetrySample>> {
        let window = self
            .fetch_lap_window(session_key, driver, lap_number)
            .await?;
        let car = self.fetch_car_data(session_key, driver, &window).await?;
        let mut samples = TelemetryAssembler::assemble(car);

        if with_location {
            let locations = self.fetch_locations(session_key, driver, &window).await?;
            attach_locations(&mut samples, locations);
        }

        debug!(session_key, driver, lap_number, samples = samples.len(), "assembled lap telemetry");
        Ok(samples)
    }

    /// Fetches one lap of a driver and projects it onto `metric`.
    ///
    /// Speed, throttle, brake, RPM and DRS are plotted against lap distance;
    /// gear is plotted against track position. The series holds one point
    /// per sample in upstream order. An empty car-data response yields an
    /// empty series.
    ///
    /// # Errors
    ///
    /// Fails if the lap cannot be found or any request fails.
    #[instrument(skip(self))]
    pub async fn fetch_metric_series(
        &self,
        session_key: u32,
        driver: &str,
        lap_number: u32,
        metric: Metric,
    ) -> Result<MetricSeries> {
        let samples = self
            .fetch_raw_telemetry(session_key, driver, lap_number, metric.needs_location())
            .await?;
        Ok(project(&samples, metric))
    }

    /// Resolves (year, event, session) and fetches a lap's metric series.
    ///
    /// # Errors
    ///
    /// Fails if resolution fails; no telemetry is requested in that case.
    pub async fn fetch_event_metric_series(
        &self,
        year: i32,
        event: &str,
        session: &str,
        driver: &str,
        lap_number: u32,
        metric: Metric,
    ) -> Result<MetricSeries> {
        let session = self.resolve_event_session(year, event, session).await?;
        self.fetch_metric_series(session.session_key, driver, lap_number, metric)
            .await
    }
}

/// Query selecting one driver's samples within a lap window.
fn window_query(session_key: u32, driver: &str, window: &LapWindow) -> Query {
    Query::new()
        .eq("session_key", session_key)
        .eq("driver_number", driver)
        .between("date", window.start, window.end)
}

fn lap_not_found(session_key: u32, driver: &str, lap_number: u32) -> PitwallError {
    PitwallError::not_found(
        "lap",
        lap_number.to_string(),
        format!("session {session_key}, driver {driver}"),
    )
}
