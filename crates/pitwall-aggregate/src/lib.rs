//! Pure data transforms for the pitwall OpenF1 client.
//!
//! This crate provides the logic that runs between HTTP responses and chart
//! data, with no I/O of its own:
//!
//! - [`rank_matches`] / [`Resolution`] - Fuzzy first-match name resolution
//! - [`TelemetryAssembler`] / [`project`] - Raw samples to metric series
//! - [`MergedLapTable`] - Sparse lap-number by driver lap-time table

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pitwall-rs/pitwall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod matching;
mod merge;
mod projection;

pub use matching::{Candidate, Resolution, rank_matches};
pub use merge::{DriverFailure, DriverLaps, LapMergeReport, LapRow, MergedLapTable};
pub use projection::{TelemetryAssembler, attach_locations, project};
