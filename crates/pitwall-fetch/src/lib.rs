//! OpenF1 client for the pitwall chart data library.
//!
//! This crate provides the network-facing half of pitwall:
//!
//! - [`url::Query`] - OpenF1 query strings, including comparison filters
//! - [`OpenF1Client`] - HTTP client with every fetch operation
//! - Key resolution: [`OpenF1Client::resolve_meeting`], [`OpenF1Client::resolve_session`]
//! - Telemetry: [`OpenF1Client::fetch_metric_series`]
//! - Lap tables: [`OpenF1Client::merge_lap_times`],
//!   [`OpenF1Client::merge_lap_times_best_effort`]
//! - Leaf lookups: schedule, standings, results, positions, intervals

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pitwall-rs/pitwall/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod laps;
mod lookups;
mod resolve;
mod telemetry;
pub mod url;

pub use client::{BASE_URL_ENV, ClientConfig, OpenF1Client, RequestError};
