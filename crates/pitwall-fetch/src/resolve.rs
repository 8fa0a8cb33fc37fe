//! Resolution of season, event and session names to OpenF1 keys.

use pitwall_aggregate::Resolution;
use pitwall_types::{Meeting, PitwallError, Result, Session};
use tracing::{info, instrument, warn};

use crate::OpenF1Client;
use crate::url::{Endpoint, Query};

impl OpenF1Client {
    /// Fetches every meeting of a season, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_meetings(&self, year: i32) -> Result<Vec<Meeting>> {
        self.get(Endpoint::Meetings, &Query::new().eq("year", year))
            .await
    }

    /// Fetches every session of a meeting, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn fetch_sessions(&self, meeting_key: u32) -> Result<Vec<Session>> {
        self.get(Endpoint::Sessions, &Query::new().eq("meeting_key", meeting_key))
            .await
    }

    /// Resolves an event name fragment within a season.
    ///
    /// The first meeting, in upstream order, whose name contains `event`
    /// (ignoring case) is chosen; every other match stays available through
    /// [`Resolution::candidates`].
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::NotFound`] if no meeting matches, or the
    /// request error if the lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve_meeting(&self, year: i32, event: &str) -> Result<Resolution<Meeting>> {
        let meetings = self.fetch_meetings(year).await?;
        let resolution = Resolution::from_items(meetings, event, |m| m.meeting_name.as_str())
            .ok_or_else(|| PitwallError::not_found("meeting", event, format!("year {year}")))?;

        report(&resolution, "meeting");
        Ok(resolution)
    }

    /// Resolves an event name fragment to its meeting key.
    ///
    /// # Errors
    ///
    /// See [`OpenF1Client::resolve_meeting`].
    pub async fn resolve_meeting_key(&self, year: i32, event: &str) -> Result<u32> {
        Ok(self.resolve_meeting(year, event).await?.chosen().meeting_key)
    }

    /// Resolves a session name fragment within a meeting.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::NotFound`] if no session matches, or the
    /// request error if the lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve_session(
        &self,
        meeting_key: u32,
        session: &str,
    ) -> Result<Resolution<Session>> {
        let sessions = self.fetch_sessions(meeting_key).await?;
        let resolution = Resolution::from_items(sessions, session, |s| s.session_name.as_str())
            .ok_or_else(|| {
                PitwallError::not_found("session", session, format!("meeting {meeting_key}"))
            })?;

        report(&resolution, "session");
        Ok(resolution)
    }

    /// Resolves a session name fragment to its session key.
    ///
    /// # Errors
    ///
    /// See [`OpenF1Client::resolve_session`].
    pub async fn resolve_session_key(&self, meeting_key: u32, session: &str) -> Result<u32> {
        Ok(self
            .resolve_session(meeting_key, session)
            .await?
            .chosen()
            .session_key)
    }

    /// Resolves (year, event, session) to a session in two lookups.
    ///
    /// # Errors
    ///
    /// Fails if either step fails; the session lookup is not attempted when
    /// the meeting cannot be resolved.
    pub async fn resolve_event_session(
        &self,
        year: i32,
        event: &str,
        session: &str,
    ) -> Result<Session> {
        let meeting_key = self.resolve_meeting_key(year, event).await?;
        Ok(self
            .resolve_session(meeting_key, session)
            .await?
            .into_chosen())
    }
}

/// Logs the outcome of a resolution.
fn report<T: std::fmt::Display>(resolution: &Resolution<T>, kind: &str) {
    let chosen = resolution.chosen();
    if resolution.is_ambiguous() {
        warn!(
            kind,
            fragment = resolution.fragment(),
            candidates = resolution.candidates().len(),
            %chosen,
            "ambiguous name, using first match"
        );
    } else {
        info!(kind, fragment = resolution.fragment(), %chosen, "resolved");
    }
}
