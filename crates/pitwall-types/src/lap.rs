//! Lap records and lap time windows.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One driver's lap as returned by the `laps` endpoint.
///
/// Every timing field is optional: out-laps and red-flagged laps routinely
/// come back with nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Car number of the driver.
    pub driver_number: u32,
    /// Lap number, starting at 1.
    pub lap_number: u32,
    /// Lap time in seconds.
    #[serde(default)]
    pub lap_duration: Option<f64>,
    /// Sector 1 time in seconds.
    #[serde(default)]
    pub duration_sector_1: Option<f64>,
    /// Sector 2 time in seconds.
    #[serde(default)]
    pub duration_sector_2: Option<f64>,
    /// Sector 3 time in seconds.
    #[serde(default)]
    pub duration_sector_3: Option<f64>,
    /// Whether the lap started in the pit lane.
    #[serde(default)]
    pub is_pit_out_lap: bool,
    /// Speed at the first intermediate (km/h).
    #[serde(default)]
    pub i1_speed: Option<f64>,
    /// Speed at the second intermediate (km/h).
    #[serde(default)]
    pub i2_speed: Option<f64>,
    /// Speed trap reading (km/h).
    #[serde(default)]
    pub st_speed: Option<f64>,
    /// Time the lap started (UTC).
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
}

impl LapRecord {
    /// Returns the time span covered by this lap.
    ///
    /// Returns `None` when either the start time or the duration is missing,
    /// or when the duration is not a finite positive span representable as a
    /// timestamp offset.
    #[must_use]
    pub fn window(&self) -> Option<LapWindow> {
        let start = self.date_start?;
        let duration = self.lap_duration.filter(|d| d.is_finite())?;
        let millis = (duration * 1000.0).round() as i64;
        let end = start.checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
        LapWindow::new(start, end)
    }

    /// Returns the sum of the three sector times, if all are present.
    #[must_use]
    pub fn sector_sum(&self) -> Option<f64> {
        Some(self.duration_sector_1? + self.duration_sector_2? + self.duration_sector_3?)
    }
}

/// Half-open time interval `[start, end)` covered by a lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapWindow {
    /// Start instant (inclusive).
    pub start: DateTime<Utc>,
    /// End instant (exclusive).
    pub end: DateTime<Utc>,
}

impl LapWindow {
    /// Creates a new window, returning `None` unless `start < end`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the instant falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

impl std::fmt::Display for LapWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lap(date_start: Option<DateTime<Utc>>, lap_duration: Option<f64>) -> LapRecord {
        LapRecord {
            driver_number: 1,
            lap_number: 8,
            lap_duration,
            duration_sector_1: Some(26.966),
            duration_sector_2: Some(38.657),
            duration_sector_3: Some(26.12),
            is_pit_out_lap: false,
            i1_speed: Some(307.0),
            i2_speed: Some(277.0),
            st_speed: Some(298.0),
            date_start,
        }
    }

    #[test]
    fn test_lap_deserialize_with_nulls() {
        let json = r#"{
            "date_start": null,
            "driver_number": 63,
            "duration_sector_1": null,
            "duration_sector_2": 38.657,
            "duration_sector_3": 26.12,
            "i1_speed": null,
            "i2_speed": 277,
            "is_pit_out_lap": true,
            "lap_duration": null,
            "lap_number": 1,
            "meeting_key": 1219,
            "segments_sector_1": [null, 2049, 2051],
            "session_key": 9161,
            "st_speed": 298
        }"#;
        let record: LapRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.lap_number, 1);
        assert!(record.is_pit_out_lap);
        assert_eq!(record.lap_duration, None);
        assert_eq!(record.st_speed, Some(298.0));
        assert!(record.window().is_none());
        assert!(record.sector_sum().is_none());
    }

    #[test]
    fn test_lap_window() {
        let start = Utc.with_ymd_and_hms(2023, 9, 16, 13, 59, 7).unwrap();
        let window = lap(Some(start), Some(91.743)).window().unwrap();

        assert_eq!(window.start, start);
        assert_eq!(window.duration(), TimeDelta::milliseconds(91_743));
        assert!(window.contains(start));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn test_lap_window_requires_both_fields() {
        let start = Utc.with_ymd_and_hms(2023, 9, 16, 13, 59, 7).unwrap();
        assert!(lap(Some(start), None).window().is_none());
        assert!(lap(None, Some(90.0)).window().is_none());
        assert!(lap(Some(start), Some(0.0)).window().is_none());
    }

    #[test]
    fn test_lap_window_rejects_unrepresentable_duration() {
        let json = r#"{
            "driver_number": 1,
            "lap_number": 5,
            "lap_duration": 1e300,
            "date_start": "2023-09-03T13:05:00+00:00"
        }"#;
        let record: LapRecord = serde_json::from_str(json).unwrap();
        assert!(record.window().is_none());

        let start = Utc.with_ymd_and_hms(2023, 9, 16, 13, 59, 7).unwrap();
        assert!(lap(Some(start), Some(f64::INFINITY)).window().is_none());
        assert!(lap(Some(start), Some(f64::NAN)).window().is_none());
        assert!(lap(Some(start), Some(-91.0)).window().is_none());
    }

    #[test]
    fn test_sector_sum() {
        let sum = lap(None, None).sector_sum().unwrap();
        assert!((sum - 91.743).abs() < 1e-9);
    }
}
