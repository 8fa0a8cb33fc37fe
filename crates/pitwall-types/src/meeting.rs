//! Meetings (race weekends) and the sessions within them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A race weekend as returned by the `meetings` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique meeting identifier.
    pub meeting_key: u32,
    /// Display name (e.g. "Italian Grand Prix").
    #[serde(default)]
    pub meeting_name: String,
    /// Sponsored official name.
    #[serde(default)]
    pub meeting_official_name: Option<String>,
    /// Host country.
    #[serde(default)]
    pub country_name: String,
    /// Short circuit name (e.g. "Monza").
    #[serde(default)]
    pub circuit_short_name: Option<String>,
    /// City or venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Start of the weekend (UTC).
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    /// Championship year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl std::fmt::Display for Meeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.meeting_name, self.meeting_key)
    }
}

/// A timed activity within a meeting, as returned by the `sessions` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub session_key: u32,
    /// Meeting this session belongs to.
    pub meeting_key: u32,
    /// Display name (e.g. "Practice 1", "Sprint", "Race").
    #[serde(default)]
    pub session_name: String,
    /// Session type (e.g. "Practice", "Qualifying", "Race").
    #[serde(default)]
    pub session_type: String,
    /// Scheduled start (UTC).
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    /// Scheduled end (UTC).
    #[serde(default)]
    pub date_end: Option<DateTime<Utc>>,
    /// Championship year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl Session {
    /// Returns true if this is a grand prix race (not a sprint).
    #[must_use]
    pub fn is_race(&self) -> bool {
        self.session_type.eq_ignore_ascii_case("race")
            && self.session_name.eq_ignore_ascii_case("race")
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.session_name, self.session_key)
    }
}

/// One row of a season calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Meeting identifier.
    pub meeting_key: u32,
    /// Event name.
    pub name: String,
    /// Host country.
    pub country: String,
    /// Short circuit name, falling back to the location.
    pub circuit: Option<String>,
    /// Start of the weekend (UTC).
    pub date_start: Option<DateTime<Utc>>,
}

impl From<Meeting> for ScheduleEntry {
    fn from(meeting: Meeting) -> Self {
        Self {
            meeting_key: meeting.meeting_key,
            name: meeting.meeting_name,
            country: meeting.country_name,
            circuit: meeting.circuit_short_name.or(meeting.location),
            date_start: meeting.date_start,
        }
    }
}
