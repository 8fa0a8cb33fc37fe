//! Projection of raw car telemetry into chart series.

use chrono::{DateTime, Utc};
use pitwall_types::{
    CarDataSample, GearPoint, LocationSample, Metric, MetricSeries, RawTelemetrySample,
    SeriesPoint, normalize_drs,
};

/// Streaming assembler that derives lap distance from car samples.
///
/// Distance is integrated from speed with the trapezoidal rule over the
/// sample timestamps. Samples are taken in the order given; a timestamp that
/// goes backwards adds no distance.
#[derive(Debug, Default)]
pub struct TelemetryAssembler {
    previous: Option<(DateTime<Utc>, f64)>,
    distance: f64,
}

impl TelemetryAssembler {
    /// Creates a new assembler at distance zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: None,
            distance: 0.0,
        }
    }

    /// Returns the distance covered so far, in metres.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Processes a car sample, returning it with its lap distance.
    pub fn process(&mut self, car: CarDataSample) -> RawTelemetrySample {
        let speed = car.speed.unwrap_or(0.0);

        if let Some((previous_date, previous_speed)) = self.previous {
            let millis = (car.date - previous_date).num_milliseconds().max(0);
            let seconds = millis as f64 / 1000.0;
            // km/h to m/s
            self.distance += (previous_speed + speed) / 2.0 / 3.6 * seconds;
        }
        self.previous = Some((car.date, speed));

        RawTelemetrySample {
            distance: self.distance,
            car,
            location: None,
        }
    }

    /// Assembles a whole lap of car samples.
    #[must_use]
    pub fn assemble(samples: Vec<CarDataSample>) -> Vec<RawTelemetrySample> {
        let mut assembler = Self::new();
        samples
            .into_iter()
            .map(|sample| assembler.process(sample))
            .collect()
    }
}

/// Attaches to each sample the latest location fix at or before it.
///
/// Samples that precede every fix keep `location: None`.
pub fn attach_locations(samples: &mut [RawTelemetrySample], mut locations: Vec<LocationSample>) {
    locations.sort_by_key(|location| location.date);

    for sample in samples {
        let after = locations.partition_point(|location| location.date <= sample.car.date);
        sample.location = after.checked_sub(1).map(|i| locations[i]);
    }
}

/// Projects raw samples into the chart shape of `metric`.
///
/// The output has exactly one point per input sample, in input order.
/// Missing readings project as zero.
#[must_use]
pub fn project(samples: &[RawTelemetrySample], metric: Metric) -> MetricSeries {
    match metric {
        Metric::Gear => MetricSeries::Gear(
            samples
                .iter()
                .map(|sample| GearPoint {
                    x: sample.location.map(|location| location.x),
                    y: sample.location.map(|location| location.y),
                    n_gear: sample.car.n_gear.unwrap_or(0),
                })
                .collect(),
        ),
        _ => MetricSeries::Points(
            samples
                .iter()
                .map(|sample| SeriesPoint::new(sample.distance, reading(&sample.car, metric)))
                .collect(),
        ),
    }
}

/// Reads the value of `metric` from a car sample.
fn reading(car: &CarDataSample, metric: Metric) -> f64 {
    match metric {
        Metric::Speed => car.speed.unwrap_or(0.0),
        Metric::Throttle => car.throttle.unwrap_or(0.0),
        Metric::Brake => car.brake.unwrap_or(0.0),
        Metric::Rpm => car.rpm.unwrap_or(0.0),
        Metric::Drs => f64::from(normalize_drs(&car.drs)),
        Metric::Gear => f64::from(car.n_gear.unwrap_or(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::{Value, json};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 9, 3, 13, 5, 0).unwrap()
    }

    fn car(millis: i64, speed: f64, drs: Value) -> CarDataSample {
        CarDataSample {
            date: start() + TimeDelta::milliseconds(millis),
            driver_number: 1,
            speed: Some(speed),
            throttle: Some(99.0),
            brake: Some(0.0),
            rpm: Some(11_000.0),
            n_gear: Some(7),
            drs,
        }
    }

    fn location(millis: i64, x: f64, y: f64) -> LocationSample {
        LocationSample {
            date: start() + TimeDelta::milliseconds(millis),
            x,
            y,
            z: 0.0,
        }
    }

    #[test]
    fn test_distance_integration() {
        // 360 km/h = 100 m/s
        let samples = TelemetryAssembler::assemble(vec![
            car(0, 360.0, json!(0)),
            car(1000, 360.0, json!(0)),
            car(1500, 0.0, json!(0)),
        ]);

        assert_relative_eq!(samples[0].distance, 0.0);
        assert_relative_eq!(samples[1].distance, 100.0);
        assert_relative_eq!(samples[2].distance, 125.0);
    }

    #[test]
    fn test_backwards_timestamp_adds_nothing() {
        let mut assembler = TelemetryAssembler::new();
        assembler.process(car(1000, 360.0, json!(0)));
        let sample = assembler.process(car(500, 360.0, json!(0)));

        assert_relative_eq!(sample.distance, 0.0);
        assert_relative_eq!(assembler.distance(), 0.0);
    }

    #[test]
    fn test_projection_preserves_length_and_order() {
        let samples = TelemetryAssembler::assemble(vec![
            car(0, 300.0, json!(0)),
            car(2000, 200.0, json!(0)),
            car(1000, 250.0, json!(0)),
        ]);

        for metric in Metric::all() {
            assert_eq!(project(&samples, *metric).len(), samples.len());
        }

        let speed = project(&samples, Metric::Speed);
        let ys: Vec<_> = speed.as_points().unwrap().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![300.0, 200.0, 250.0]);
    }

    #[test]
    fn test_drs_projection() {
        let samples = TelemetryAssembler::assemble(vec![
            car(0, 300.0, json!("1")),
            car(100, 300.0, json!("0")),
            car(200, 300.0, json!(0)),
            car(300, 300.0, Value::Null),
            car(400, 300.0, json!(12)),
        ]);
        let series = project(&samples, Metric::Drs);
        let ys: Vec<_> = series.as_points().unwrap().iter().map(|p| p.y).collect();

        assert_eq!(ys, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_readings_project_as_zero() {
        let mut sample = car(0, 0.0, Value::Null);
        sample.speed = None;
        sample.rpm = None;
        sample.n_gear = None;
        let samples = TelemetryAssembler::assemble(vec![sample]);

        assert_relative_eq!(project(&samples, Metric::Rpm).as_points().unwrap()[0].y, 0.0);
        assert_eq!(project(&samples, Metric::Gear).as_gear().unwrap()[0].n_gear, 0);
    }

    #[test]
    fn test_gear_projection_uses_latest_location() {
        let mut samples = TelemetryAssembler::assemble(vec![
            car(0, 100.0, json!(0)),
            car(300, 100.0, json!(0)),
            car(600, 100.0, json!(0)),
        ]);
        attach_locations(
            &mut samples,
            vec![location(550, 30.0, 40.0), location(100, 10.0, 20.0)],
        );

        let series = project(&samples, Metric::Gear);
        let points = series.as_gear().unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, None);
        assert_eq!(points[1].x, Some(10.0));
        assert_eq!(points[1].y, Some(20.0));
        assert_eq!(points[2].x, Some(30.0));
        assert_eq!(points[2].n_gear, 7);
    }
}
