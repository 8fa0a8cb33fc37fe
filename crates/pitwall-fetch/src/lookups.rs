//! Season schedule, results, standings and race-progress lookups.

use chrono::Utc;
use pitwall_types::{
    Driver, DriverChampionship, DriverStanding, IntervalRecord, PitwallError, PositionPoint,
    PositionRecord, RaceResult, RaceWinner, Result, ScheduleEntry, Session, SessionResult,
    StintSummary, TeamChampionship, TeamStanding,
};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::OpenF1Client;
use crate::url::{Endpoint, Query};

impl OpenF1Client {
    /// Fetches the season calendar, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_schedule(&self, year: i32) -> Result<Vec<ScheduleEntry>> {
        let mut schedule: Vec<ScheduleEntry> = self
            .fetch_meetings(year)
            .await?
            .into_iter()
            .map(ScheduleEntry::from)
            .collect();
        schedule.sort_by_key(|entry| entry.date_start);
        Ok(schedule)
    }

    /// Fetches the entry list of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_entry_list(&self, session_key: u32) -> Result<Vec<Driver>> {
        self.get(Endpoint::Drivers, &Query::new().eq("session_key", session_key))
            .await
    }

    /// Fetches the grand prix race sessions of a season, ordered by start.
    ///
    /// Sprint races are excluded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_race_sessions(&self, year: i32) -> Result<Vec<Session>> {
        let query = Query::new().eq("year", year).eq("session_name", "Race");
        let mut sessions: Vec<Session> = self.get(Endpoint::Sessions, &query).await?;
        sessions.retain(Session::is_race);
        sessions.sort_by_key(|session| session.date_start);
        Ok(sessions)
    }

    /// Returns the most recent race of a season that has already started.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::NotFound`] if no race of the season has started.
    pub async fn latest_race_session(&self, year: i32) -> Result<Session> {
        let now = Utc::now();
        self.fetch_race_sessions(year)
            .await?
            .into_iter()
            .rev()
            .find(|session| session.date_start.is_some_and(|start| start <= now))
            .ok_or_else(|| PitwallError::not_found("session", "Race", format!("year {year}")))
    }

    /// Fetches the drivers' championship after the latest race of a season.
    ///
    /// # Errors
    ///
    /// Fails if no race has started or any request fails.
    #[instrument(skip(self))]
    pub async fn fetch_driver_standings(&self, year: i32) -> Result<Vec<DriverStanding>> {
        let session = self.latest_race_session(year).await?;
        let rows: Vec<DriverChampionship> = self
            .get(
                Endpoint::ChampionshipDrivers,
                &Query::new().eq("session_key", session.session_key),
            )
            .await?;
        let entries = self.fetch_entry_list(session.session_key).await?;
        let drivers = index_drivers(&entries);

        let mut standings: Vec<DriverStanding> = rows
            .into_iter()
            .map(|row| {
                let driver = drivers.get(&row.driver_number).copied();
                DriverStanding::from_parts(row, driver)
            })
            .collect();
        standings.sort_by_key(|s| (s.position.is_none(), s.position));
        Ok(standings)
    }

    /// Fetches the constructors' championship after the latest race of a season.
    ///
    /// # Errors
    ///
    /// Fails if no race has started or any request fails.
    #[instrument(skip(self))]
    pub async fn fetch_team_standings(&self, year: i32) -> Result<Vec<TeamStanding>> {
        let session = self.latest_race_session(year).await?;
        let rows: Vec<TeamChampionship> = self
            .get(
                Endpoint::ChampionshipTeams,
                &Query::new().eq("session_key", session.session_key),
            )
            .await?;

        let mut standings: Vec<TeamStanding> = rows.into_iter().map(TeamStanding::from).collect();
        standings.sort_by_key(|s| (s.position.is_none(), s.position));
        Ok(standings)
    }

    /// Fetches the winner of every grand prix of a season.
    ///
    /// Races are queried one after another; races without a classified
    /// winner yet are skipped.
    ///
    /// # Errors
    ///
    /// Fails on the first request error.
    #[instrument(skip(self))]
    pub async fn fetch_race_results(&self, year: i32) -> Result<Vec<RaceWinner>> {
        let mut winners = Vec::new();

        for session in self.fetch_race_sessions(year).await? {
            let query = Query::new()
                .eq("session_key", session.session_key)
                .eq("position", 1);
            let results: Vec<SessionResult> = self.get(Endpoint::SessionResult, &query).await?;
            let Some(winner) = results.into_iter().next() else {
                debug!(session_key = session.session_key, "no classified winner");
                continue;
            };

            let driver_query = Query::new()
                .eq("session_key", session.session_key)
                .eq("driver_number", winner.driver_number);
            let driver: Option<Driver> = self
                .get(Endpoint::Drivers, &driver_query)
                .await?
                .into_iter()
                .next();

            winners.push(RaceWinner {
                meeting_key: session.meeting_key,
                session_key: session.session_key,
                date_start: session.date_start,
                driver_number: winner.driver_number,
                name: driver.as_ref().and_then(|d| d.full_name.clone()),
                team: driver.and_then(|d| d.team_name),
                time: winner.duration,
            });
        }

        Ok(winners)
    }

    /// Fetches the classification of a session joined with its entry list.
    ///
    /// Rows are ordered by position, unclassified drivers last.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails.
    pub async fn fetch_session_results(&self, session_key: u32) -> Result<Vec<RaceResult>> {
        let results: Vec<SessionResult> = self
            .get(
                Endpoint::SessionResult,
                &Query::new().eq("session_key", session_key),
            )
            .await?;
        let entries = self.fetch_entry_list(session_key).await?;
        let drivers = index_drivers(&entries);

        let mut rows: Vec<RaceResult> = results
            .into_iter()
            .map(|result| {
                let driver = drivers.get(&result.driver_number).copied();
                RaceResult::from_parts(result, driver)
            })
            .collect();
        rows.sort_by_key(|row| (row.position.is_none(), row.position));
        Ok(rows)
    }

    /// Resolves (year, event, session) and fetches its classification.
    ///
    /// # Errors
    ///
    /// Fails if resolution fails or any request fails.
    #[instrument(skip(self))]
    pub async fn fetch_specific_race_results(
        &self,
        year: i32,
        event: &str,
        session: &str,
    ) -> Result<Vec<RaceResult>> {
        let session = self.resolve_event_session(year, event, session).await?;
        self.fetch_session_results(session.session_key).await
    }

    /// Fetches a driver's race position over time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_position_history(
        &self,
        session_key: u32,
        driver: &str,
    ) -> Result<Vec<PositionPoint>> {
        let query = Query::new()
            .eq("session_key", session_key)
            .eq("driver_number", driver);
        let records: Vec<PositionRecord> = self.get(Endpoint::Position, &query).await?;
        Ok(records.into_iter().map(PositionPoint::from).collect())
    }

    /// Fetches a driver's gap to the leader and to the car ahead over time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_intervals(
        &self,
        session_key: u32,
        driver: &str,
    ) -> Result<Vec<IntervalRecord>> {
        let query = Query::new()
            .eq("session_key", session_key)
            .eq("driver_number", driver);
        self.get(Endpoint::Intervals, &query).await
    }

    /// Stint analysis placeholder.
    ///
    /// Always resolves to an empty list without contacting the API.
    ///
    /// # Errors
    ///
    /// Never fails.
    pub async fn fetch_stint_analysis<S>(
        &self,
        session_key: u32,
        drivers: &[S],
    ) -> Result<Vec<StintSummary>>
    where
        S: AsRef<str> + Sync,
    {
        debug!(session_key, drivers = drivers.len(), "stint analysis is not available");
        Ok(Vec::new())
    }
}

/// Indexes an entry list by car number.
fn index_drivers(entries: &[Driver]) -> HashMap<u32, &Driver> {
    entries.iter().map(|d| (d.driver_number, d)).collect()
}
