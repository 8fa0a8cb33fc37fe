//! Raw telemetry readings and the chart shapes projected from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One car-state reading as returned by the `car_data` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDataSample {
    /// Timestamp of the reading (UTC).
    pub date: DateTime<Utc>,
    /// Car number of the driver.
    pub driver_number: u32,
    /// Speed in km/h.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Throttle application in percent.
    #[serde(default)]
    pub throttle: Option<f64>,
    /// Brake application (0 or 100).
    #[serde(default)]
    pub brake: Option<f64>,
    /// Engine revolutions per minute.
    #[serde(default)]
    pub rpm: Option<f64>,
    /// Selected gear (0 = neutral).
    #[serde(default)]
    pub n_gear: Option<u8>,
    /// DRS state exactly as sent upstream.
    ///
    /// Kept untyped; see [`normalize_drs`] for the 0/1 interpretation.
    #[serde(default)]
    pub drs: Value,
}

/// One car position reading as returned by the `location` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Timestamp of the reading (UTC).
    pub date: DateTime<Utc>,
    /// Track-local x coordinate.
    pub x: f64,
    /// Track-local y coordinate.
    pub y: f64,
    /// Track-local z coordinate.
    #[serde(default)]
    pub z: f64,
}

/// A car reading joined with its derived lap distance and, when requested,
/// the closest preceding location fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTelemetrySample {
    /// Metres travelled since the first sample of the lap.
    pub distance: f64,
    /// The car reading.
    pub car: CarDataSample,
    /// Location at or before the reading, if known.
    pub location: Option<LocationSample>,
}

/// A two-field chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Horizontal axis value (lap distance in metres).
    pub x: f64,
    /// Vertical axis value (the metric reading).
    pub y: f64,
}

impl SeriesPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A track-map chart point coloured by gear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearPoint {
    /// Track-local x coordinate, if a location fix was available.
    pub x: Option<f64>,
    /// Track-local y coordinate, if a location fix was available.
    pub y: Option<f64>,
    /// Selected gear.
    #[serde(rename = "nGear")]
    pub n_gear: u8,
}

/// A projected telemetry series, one point per raw sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricSeries {
    /// Distance-based series (speed, throttle, brake, RPM, DRS).
    Points(Vec<SeriesPoint>),
    /// Position-based gear series.
    Gear(Vec<GearPoint>),
}

impl MetricSeries {
    /// Returns the number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Points(points) => points.len(),
            Self::Gear(points) => points.len(),
        }
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the distance-based points, if this is such a series.
    #[must_use]
    pub fn as_points(&self) -> Option<&[SeriesPoint]> {
        match self {
            Self::Points(points) => Some(points),
            Self::Gear(_) => None,
        }
    }

    /// Returns the gear points, if this is a gear series.
    #[must_use]
    pub fn as_gear(&self) -> Option<&[GearPoint]> {
        match self {
            Self::Gear(points) => Some(points),
            Self::Points(_) => None,
        }
    }
}

/// Normalizes an upstream DRS value to 0 (closed) or 1 (open).
///
/// Only the string `"1"` counts as open. Every other value, including
/// numbers, `"0"` and `null`, is treated as closed.
#[must_use]
pub fn normalize_drs(value: &Value) -> u8 {
    match value {
        Value::String(s) if s == "1" => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_car_data_deserialize() {
        let json = r#"{
            "brake": 0,
            "date": "2023-09-15T13:08:19.923000+00:00",
            "driver_number": 55,
            "drs": 12,
            "meeting_key": 1219,
            "n_gear": 8,
            "rpm": 11141,
            "session_key": 9159,
            "speed": 315,
            "throttle": 99
        }"#;
        let sample: CarDataSample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.driver_number, 55);
        assert_eq!(sample.speed, Some(315.0));
        assert_eq!(sample.n_gear, Some(8));
        assert_eq!(sample.drs, json!(12));
    }

    #[test]
    fn test_missing_drs_is_null() {
        let json = r#"{"date": "2023-09-15T13:08:19.923000+00:00", "driver_number": 1}"#;
        let sample: CarDataSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.drs, Value::Null);
        assert_eq!(normalize_drs(&sample.drs), 0);
    }

    #[test]
    fn test_normalize_drs() {
        assert_eq!(normalize_drs(&json!("1")), 1);
        assert_eq!(normalize_drs(&json!("0")), 0);
        assert_eq!(normalize_drs(&json!(0)), 0);
        assert_eq!(normalize_drs(&json!(1)), 0);
        assert_eq!(normalize_drs(&json!(12)), 0);
        assert_eq!(normalize_drs(&json!(null)), 0);
        assert_eq!(normalize_drs(&json!(" 1")), 0);
    }

    #[test]
    fn test_gear_point_serializes_camel_case() {
        let point = GearPoint {
            x: Some(567.0),
            y: Some(3195.0),
            n_gear: 7,
        };
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(value, json!({"x": 567.0, "y": 3195.0, "nGear": 7}));
    }

    #[test]
    fn test_series_serializes_as_plain_array() {
        let series = MetricSeries::Points(vec![SeriesPoint::new(0.0, 290.0)]);
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value, json!([{"x": 0.0, "y": 290.0}]));
        assert_eq!(series.len(), 1);
        assert!(series.as_gear().is_none());
    }
}
