//! Error types for pitwall.

use thiserror::Error;

/// Result type alias for pitwall operations.
pub type Result<T> = std::result::Result<T, PitwallError>;

/// Errors that can occur while resolving keys and fetching data.
#[derive(Error, Debug)]
pub enum PitwallError {
    /// No record matched the requested identifier.
    #[error("No {kind} matching '{fragment}' in {scope}")]
    NotFound {
        /// What was being resolved ("meeting", "session", "lap").
        kind: &'static str,
        /// The name fragment or identifier that failed to match.
        fragment: String,
        /// Human-readable scope of the search (e.g. "year 2024").
        scope: String,
    },

    /// Upstream answered with a non-success status.
    #[error("Server returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The request could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl PitwallError {
    /// Creates a [`PitwallError::NotFound`].
    #[must_use]
    pub fn not_found(
        kind: &'static str,
        fragment: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            kind,
            fragment: fragment.into(),
            scope: scope.into(),
        }
    }

    /// Returns true if this is a resolution failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code, if the error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = PitwallError::not_found("meeting", "Monza", "year 2024");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No meeting matching 'Monza' in year 2024");
    }

    #[test]
    fn test_status_code() {
        let err = PitwallError::Status {
            status: 503,
            url: "https://api.openf1.org/v1/laps".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_found());
        assert_eq!(PitwallError::Http("reset".into()).status(), None);
    }

    #[test]
    fn test_json_conversion() {
        let parse = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        let err: PitwallError = parse.into();
        assert!(matches!(err, PitwallError::Json(_)));
    }
}
