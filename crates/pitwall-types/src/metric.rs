//! Telemetry channel selection for chart series.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A telemetry channel that can be projected into a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Distance vs speed (km/h).
    #[default]
    Speed,
    /// Distance vs throttle application (%).
    Throttle,
    /// Distance vs brake application.
    Brake,
    /// Distance vs engine RPM.
    Rpm,
    /// Distance vs DRS flap state (0/1).
    Drs,
    /// Track position vs selected gear.
    Gear,
}

impl Metric {
    /// Returns true if this metric needs car location samples.
    #[must_use]
    pub const fn needs_location(&self) -> bool {
        matches!(self, Self::Gear)
    }

    /// Returns the metric as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Throttle => "throttle",
            Self::Brake => "brake",
            Self::Rpm => "rpm",
            Self::Drs => "drs",
            Self::Gear => "gear",
        }
    }

    /// Returns the unit label of the y axis.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Speed => "km/h",
            Self::Throttle | Self::Brake => "%",
            Self::Rpm => "rpm",
            Self::Drs => "on/off",
            Self::Gear => "gear",
        }
    }

    /// Returns all available metrics.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Speed,
            Self::Throttle,
            Self::Brake,
            Self::Rpm,
            Self::Drs,
            Self::Gear,
        ]
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = MetricParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speed" | "velocity" => Ok(Self::Speed),
            "throttle" | "accelerator" => Ok(Self::Throttle),
            "brake" | "braking" => Ok(Self::Brake),
            "rpm" | "revs" => Ok(Self::Rpm),
            "drs" => Ok(Self::Drs),
            "gear" | "n_gear" | "ngear" => Ok(Self::Gear),
            _ => Err(MetricParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid metric string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricParseError(String);

impl std::fmt::Display for MetricParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid metric '{}', expected one of: speed, throttle, brake, rpm, drs, gear",
            self.0
        )
    }
}

impl std::error::Error for MetricParseError {}
