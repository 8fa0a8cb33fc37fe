//! OpenF1 URL and query construction.
//!
//! OpenF1 expresses range filters by appending the comparison operator to the
//! parameter name (`date>=2023-09-16T13:00:00Z`). [`Query`] keeps that
//! convention in one place; callers only state which [`Filter`] they want.

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Default base URL of the OpenF1 API.
pub const BASE_URL: &str = "https://api.openf1.org/v1";

/// Characters escaped in query values.
const VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':');

/// OpenF1 resources consumed by pitwall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Race weekends.
    Meetings,
    /// Sessions within a meeting.
    Sessions,
    /// Session entry list.
    Drivers,
    /// Per-driver lap summaries.
    Laps,
    /// Car telemetry samples.
    CarData,
    /// Car location samples.
    Location,
    /// Race position changes.
    Position,
    /// Timing gaps.
    Intervals,
    /// Session classification.
    SessionResult,
    /// Drivers' championship snapshot.
    ChampionshipDrivers,
    /// Constructors' championship snapshot.
    ChampionshipTeams,
}

impl Endpoint {
    /// Returns the resource path segment.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Meetings => "meetings",
            Self::Sessions => "sessions",
            Self::Drivers => "drivers",
            Self::Laps => "laps",
            Self::CarData => "car_data",
            Self::Location => "location",
            Self::Position => "position",
            Self::Intervals => "intervals",
            Self::SessionResult => "session_result",
            Self::ChampionshipDrivers => "championship_drivers",
            Self::ChampionshipTeams => "championship_teams",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Comparison applied by a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Field equals value.
    Eq,
    /// Field is greater than value.
    Gt,
    /// Field is greater than or equal to value.
    Gte,
    /// Field is less than value.
    Lt,
    /// Field is less than or equal to value.
    Lte,
}

impl Filter {
    /// Returns the operator as OpenF1 spells it between key and value.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

/// Query-string filters for an OpenF1 request.
///
/// # Example
///
/// ```
/// use pitwall_fetch::url::Query;
///
/// let query = Query::new().eq("session_key", 9161).lt("position", 4);
/// assert_eq!(query.encode(), "session_key=9161&position<4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, Filter, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Adds a filter on `key`.
    #[must_use]
    pub fn filter(mut self, key: &str, filter: Filter, value: impl ToString) -> Self {
        self.params.push((key.to_string(), filter, value.to_string()));
        self
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn eq(self, key: &str, value: impl ToString) -> Self {
        self.filter(key, Filter::Eq, value)
    }

    /// Adds a greater-than filter.
    #[must_use]
    pub fn gt(self, key: &str, value: impl ToString) -> Self {
        self.filter(key, Filter::Gt, value)
    }

    /// Adds a greater-than-or-equal filter.
    #[must_use]
    pub fn gte(self, key: &str, value: impl ToString) -> Self {
        self.filter(key, Filter::Gte, value)
    }

    /// Adds a less-than filter.
    #[must_use]
    pub fn lt(self, key: &str, value: impl ToString) -> Self {
        self.filter(key, Filter::Lt, value)
    }

    /// Adds a less-than-or-equal filter.
    #[must_use]
    pub fn lte(self, key: &str, value: impl ToString) -> Self {
        self.filter(key, Filter::Lte, value)
    }

    /// Restricts `key` to the half-open instant range `[start, end)`.
    ///
    /// Bounds are sent at millisecond precision and truncated, so a bound
    /// carrying microseconds moves up to 1 ms earlier.
    #[must_use]
    pub fn between(self, key: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.gte(key, format_instant(start))
            .lt(key, format_instant(end))
    }

    /// Returns true if no filter was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encodes the filters as an OpenF1 query string (without the `?`).
    #[must_use]
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(key, filter, value)| {
                format!(
                    "{key}{}{}",
                    filter.operator(),
                    utf8_percent_encode(value, VALUE)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Formats an instant the way OpenF1 timestamps are written.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds the full URL of an OpenF1 request.
///
/// # Example
///
/// ```
/// use pitwall_fetch::url::{Endpoint, Query, endpoint_url};
///
/// let url = endpoint_url("https://api.openf1.org/v1/", Endpoint::Meetings, &Query::new().eq("year", 2023));
/// assert_eq!(url, "https://api.openf1.org/v1/meetings?year=2023");
/// ```
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: Endpoint, query: &Query) -> String {
    let base = base_url.trim_end_matches('/');
    if query.is_empty() {
        format!("{base}/{}", endpoint.path())
    } else {
        format!("{base}/{}?{}", endpoint.path(), query.encode())
    }
}
