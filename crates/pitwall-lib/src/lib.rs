//! Formula 1 chart data from the OpenF1 API.
//!
//! This is a facade crate that re-exports functionality from the pitwall
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use pitwall_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenF1Client::with_defaults()?;
//!
//!     let session = client.resolve_event_session(2023, "Monza", "Race").await?;
//!     let speed = client
//!         .fetch_metric_series(session.session_key, "1", 5, Metric::Speed)
//!         .await?;
//!     println!("{} speed samples", speed.len());
//!
//!     let table = client.merge_lap_times(session.session_key, &["1", "55"]).await?;
//!     println!("{}", serde_json::to_string(&table)?);
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pitwall-rs/pitwall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use pitwall_types::*;

// Re-export the client
#[cfg(feature = "fetch")]
pub use pitwall_fetch::{BASE_URL_ENV, ClientConfig, OpenF1Client, RequestError, url};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use pitwall_aggregate::{
    Candidate, DriverFailure, DriverLaps, LapMergeReport, LapRow, MergedLapTable, Resolution,
    TelemetryAssembler, attach_locations, project, rank_matches,
};

/// Prelude module for convenient imports.
///
/// ```
/// use pitwall_lib::prelude::*;
/// ```
pub mod prelude {
    pub use pitwall_types::{
        LapRecord, LapWindow, Meeting, Metric, MetricSeries, PitwallError, Result, ScheduleEntry,
        Session,
    };

    #[cfg(feature = "fetch")]
    pub use pitwall_fetch::{ClientConfig, OpenF1Client};

    #[cfg(feature = "aggregate")]
    pub use pitwall_aggregate::{LapMergeReport, MergedLapTable, Resolution};
}
