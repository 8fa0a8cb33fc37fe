//! Synthetic OpenF1 payloads for pitwall benchmarks.
//!
//! Sample rates follow the live feed: car data arrives at roughly 3.7 Hz and
//! location fixes at roughly the same cadence, offset by a few milliseconds.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pitwall_types::{CarDataSample, LapRecord, LocationSample};
use serde_json::Value;

/// Milliseconds between consecutive car data samples.
pub const CAR_DATA_INTERVAL_MS: i64 = 270;

/// Typical lap length in seconds used when sizing generated laps.
pub const LAP_SECONDS: i64 = 90;

fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 9, 3, 13, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Number of car data samples in one generated lap.
#[must_use]
pub const fn samples_per_lap() -> usize {
    (LAP_SECONDS * 1000 / CAR_DATA_INTERVAL_MS) as usize
}

/// Generates `count` car data samples for one driver.
///
/// Speed oscillates between a braking zone and a straight; DRS alternates
/// between the encodings seen upstream.
#[must_use]
pub fn car_data(count: usize) -> Vec<CarDataSample> {
    let start = session_start();
    (0..count)
        .map(|i| {
            let phase = (i % 40) as f64 / 40.0;
            let speed = 310.0f64.mul_add(-0.6 * (phase * std::f64::consts::TAU).sin().abs(), 310.0);
            let drs = match i % 4 {
                0 => Value::from("1"),
                1 => Value::from(0),
                2 => Value::from(12),
                _ => Value::Null,
            };
            CarDataSample {
                date: start + TimeDelta::milliseconds(i as i64 * CAR_DATA_INTERVAL_MS),
                driver_number: 1,
                speed: Some(speed),
                throttle: Some(if phase < 0.3 { 0.0 } else { 100.0 }),
                brake: Some(if phase < 0.1 { 100.0 } else { 0.0 }),
                rpm: Some(speed.mul_add(30.0, 2_000.0)),
                n_gear: Some(((speed / 45.0) as u8).clamp(1, 8)),
                drs,
            }
        })
        .collect()
}

/// Generates `count` location fixes trailing the car data clock by 40 ms.
#[must_use]
pub fn locations(count: usize) -> Vec<LocationSample> {
    let start = session_start() - TimeDelta::milliseconds(40);
    (0..count)
        .map(|i| {
            let angle = i as f64 / count.max(1) as f64 * std::f64::consts::TAU;
            LocationSample {
                date: start + TimeDelta::milliseconds(i as i64 * CAR_DATA_INTERVAL_MS),
                x: 2_000.0 * angle.cos(),
                y: 1_200.0 * angle.sin(),
                z: 0.0,
            }
        })
        .collect()
}

/// Generates a race distance of laps for one driver.
///
/// Every tenth lap has no recorded time, the way pit and safety car laps
/// often arrive.
#[must_use]
pub fn laps(driver_number: u32, count: u32) -> Vec<LapRecord> {
    let start = session_start();
    (1..=count)
        .map(|lap_number| LapRecord {
            driver_number,
            lap_number,
            lap_duration: (lap_number % 10 != 0)
                .then(|| f64::from(driver_number).mul_add(0.01, 84.0 + f64::from(lap_number % 7) * 0.1)),
            duration_sector_1: None,
            duration_sector_2: None,
            duration_sector_3: None,
            is_pit_out_lap: false,
            i1_speed: None,
            i2_speed: None,
            st_speed: None,
            date_start: Some(start + TimeDelta::seconds(i64::from(lap_number) * LAP_SECONDS)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_ordered() {
        let samples = car_data(samples_per_lap());
        assert_eq!(samples.len(), samples_per_lap());
        assert!(samples.windows(2).all(|w| w[0].date < w[1].date));

        let laps = laps(44, 57);
        assert_eq!(laps.len(), 57);
        assert!(laps[9].lap_duration.is_none());
    }
}
