//! Entry lists, classifications, standings and race-progress records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A driver entry as returned by the `drivers` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Car number.
    pub driver_number: u32,
    /// Name as shown on broadcast graphics (e.g. "M VERSTAPPEN").
    #[serde(default)]
    pub broadcast_name: Option<String>,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Three-letter code (e.g. "VER").
    #[serde(default)]
    pub name_acronym: Option<String>,
    /// Team name.
    #[serde(default)]
    pub team_name: Option<String>,
    /// Team colour as a hex string without `#`.
    #[serde(default)]
    pub team_colour: Option<String>,
    /// Nationality code.
    #[serde(default)]
    pub country_code: Option<String>,
    /// Headshot image URL.
    #[serde(default)]
    pub headshot_url: Option<String>,
}

/// A finishing time or gap as reported by `session_result`.
///
/// Races report a single value, qualifying reports one value per segment,
/// lapped cars report text such as `"+1 LAP"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultTime {
    /// Seconds.
    Seconds(f64),
    /// Per-segment seconds (Q1, Q2, Q3).
    Segments(Vec<Option<f64>>),
    /// Free-form text.
    Text(String),
}

/// A gap reading from the `intervals` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gap {
    /// Gap in seconds.
    Seconds(f64),
    /// Lapped gap text (e.g. `"+1 LAP"`).
    Text(String),
}

impl Gap {
    /// Returns the gap in seconds, if it is a timed gap.
    #[must_use]
    pub const fn seconds(&self) -> Option<f64> {
        match self {
            Self::Seconds(s) => Some(*s),
            Self::Text(_) => None,
        }
    }
}

/// One classification row as returned by the `session_result` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Car number.
    pub driver_number: u32,
    /// Session this row belongs to.
    pub session_key: u32,
    /// Classified position; `None` when unclassified.
    #[serde(default)]
    pub position: Option<u32>,
    /// Laps completed.
    #[serde(default)]
    pub number_of_laps: Option<u32>,
    /// Total time.
    #[serde(default)]
    pub duration: Option<ResultTime>,
    /// Gap to the winner.
    #[serde(default)]
    pub gap_to_leader: Option<ResultTime>,
    /// Championship points scored.
    #[serde(default)]
    pub points: Option<f64>,
    /// Did not finish.
    #[serde(default)]
    pub dnf: bool,
    /// Did not start.
    #[serde(default)]
    pub dns: bool,
    /// Disqualified.
    #[serde(default)]
    pub dsq: bool,
}

impl SessionResult {
    /// Returns the short classification status.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.dsq {
            "DSQ"
        } else if self.dns {
            "DNS"
        } else if self.dnf {
            "DNF"
        } else {
            "Finished"
        }
    }
}

/// A classification row joined with the driver's entry details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Classified position; `None` when unclassified.
    pub position: Option<u32>,
    /// Car number.
    pub driver_number: u32,
    /// Three-letter code.
    pub acronym: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Team name.
    pub team: Option<String>,
    /// Team colour hex.
    pub team_colour: Option<String>,
    /// Laps completed.
    pub laps: Option<u32>,
    /// Total time.
    pub time: Option<ResultTime>,
    /// Gap to the winner.
    pub gap: Option<ResultTime>,
    /// Points scored.
    pub points: Option<f64>,
    /// Finished, DNF, DNS or DSQ.
    pub status: String,
}

impl RaceResult {
    /// Joins a classification row with the matching entry list record.
    #[must_use]
    pub fn from_parts(result: SessionResult, driver: Option<&Driver>) -> Self {
        Self {
            position: result.position,
            driver_number: result.driver_number,
            acronym: driver.and_then(|d| d.name_acronym.clone()),
            name: driver.and_then(|d| d.full_name.clone()),
            team: driver.and_then(|d| d.team_name.clone()),
            team_colour: driver.and_then(|d| d.team_colour.clone()),
            laps: result.number_of_laps,
            status: result.status().to_string(),
            time: result.duration,
            gap: result.gap_to_leader,
            points: result.points,
        }
    }
}

/// The winner of one grand prix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceWinner {
    /// Meeting identifier.
    pub meeting_key: u32,
    /// Race session identifier.
    pub session_key: u32,
    /// Race start (UTC).
    pub date_start: Option<DateTime<Utc>>,
    /// Winning car number.
    pub driver_number: u32,
    /// Winner's full name.
    pub name: Option<String>,
    /// Winner's team.
    pub team: Option<String>,
    /// Race time.
    pub time: Option<ResultTime>,
}

/// One row of the `championship_drivers` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverChampionship {
    /// Car number.
    pub driver_number: u32,
    /// Championship position after the session.
    #[serde(default)]
    pub position_current: Option<u32>,
    /// Points after the session.
    #[serde(default)]
    pub points_current: Option<f64>,
    /// Championship position before the session.
    #[serde(default)]
    pub position_start: Option<u32>,
    /// Points before the session.
    #[serde(default)]
    pub points_start: Option<f64>,
}

/// One row of the `championship_teams` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamChampionship {
    /// Constructor name.
    pub team_name: String,
    /// Championship position after the session.
    #[serde(default)]
    pub position_current: Option<u32>,
    /// Points after the session.
    #[serde(default)]
    pub points_current: Option<f64>,
    /// Championship position before the session.
    #[serde(default)]
    pub position_start: Option<u32>,
    /// Points before the session.
    #[serde(default)]
    pub points_start: Option<f64>,
}

/// A driver championship row joined with entry details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStanding {
    /// Championship position.
    pub position: Option<u32>,
    /// Car number.
    pub driver_number: u32,
    /// Three-letter code.
    pub acronym: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Team name.
    pub team: Option<String>,
    /// Total points.
    pub points: f64,
    /// Points scored in the standings session.
    pub points_gained: f64,
}

impl DriverStanding {
    /// Joins a championship row with the matching entry list record.
    #[must_use]
    pub fn from_parts(row: DriverChampionship, driver: Option<&Driver>) -> Self {
        let points = row.points_current.unwrap_or(0.0);
        Self {
            position: row.position_current,
            driver_number: row.driver_number,
            acronym: driver.and_then(|d| d.name_acronym.clone()),
            name: driver.and_then(|d| d.full_name.clone()),
            team: driver.and_then(|d| d.team_name.clone()),
            points,
            points_gained: points - row.points_start.unwrap_or(0.0),
        }
    }
}

/// A constructor championship row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// Championship position.
    pub position: Option<u32>,
    /// Constructor name.
    pub team: String,
    /// Total points.
    pub points: f64,
    /// Points scored in the standings session.
    pub points_gained: f64,
}

impl From<TeamChampionship> for TeamStanding {
    fn from(row: TeamChampionship) -> Self {
        let points = row.points_current.unwrap_or(0.0);
        Self {
            position: row.position_current,
            team: row.team_name,
            points,
            points_gained: points - row.points_start.unwrap_or(0.0),
        }
    }
}

/// A race position change as returned by the `position` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Time of the change (UTC).
    pub date: DateTime<Utc>,
    /// Car number.
    pub driver_number: u32,
    /// New position.
    pub position: u32,
}

/// A chart point of position over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPoint {
    /// Time of the change (UTC).
    pub date: DateTime<Utc>,
    /// Position from that instant.
    pub position: u32,
}

impl From<PositionRecord> for PositionPoint {
    fn from(record: PositionRecord) -> Self {
        Self {
            date: record.date,
            position: record.position,
        }
    }
}

/// A timing gap reading as returned by the `intervals` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// Time of the reading (UTC).
    pub date: DateTime<Utc>,
    /// Car number.
    pub driver_number: u32,
    /// Gap to the race leader.
    #[serde(default)]
    pub gap_to_leader: Option<Gap>,
    /// Gap to the car ahead.
    #[serde(default)]
    pub interval: Option<Gap>,
}

/// One tyre stint of a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StintSummary {
    /// Car number.
    pub driver_number: u32,
    /// Stint ordinal, starting at 1.
    pub stint_number: u32,
    /// Tyre compound name.
    pub compound: Option<String>,
    /// First lap of the stint.
    pub lap_start: Option<u32>,
    /// Last lap of the stint.
    pub lap_end: Option<u32>,
}
