//! Core types for the pitwall OpenF1 client.
//!
//! This crate provides the data structures shared across the workspace:
//!
//! - [`Meeting`] / [`Session`] - Race weekends and the sessions within them
//! - [`CarDataSample`] / [`LocationSample`] - Raw per-instant telemetry readings
//! - [`LapRecord`] / [`LapWindow`] - Per-driver lap summaries and their time span
//! - [`Metric`] - Telemetry channel selector for chart series
//! - [`SeriesPoint`] / [`GearPoint`] / [`MetricSeries`] - Chart-ready shapes
//! - [`PitwallError`] - Error type for every fallible operation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pitwall-rs/pitwall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod lap;
mod meeting;
mod metric;
mod results;
mod telemetry;

pub use error::{PitwallError, Result};
pub use lap::{LapRecord, LapWindow};
pub use meeting::{Meeting, ScheduleEntry, Session};
pub use metric::{Metric, MetricParseError};
pub use results::{
    Driver, DriverChampionship, DriverStanding, Gap, IntervalRecord, PositionPoint,
    PositionRecord, RaceResult, RaceWinner, ResultTime, SessionResult, StintSummary,
    TeamChampionship, TeamStanding,
};
pub use telemetry::{
    CarDataSample, GearPoint, LocationSample, MetricSeries, RawTelemetrySample, SeriesPoint,
    normalize_drs,
};
