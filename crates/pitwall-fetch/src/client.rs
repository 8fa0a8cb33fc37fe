//! HTTP client for the OpenF1 API.

use bytes::Bytes;
use pitwall_types::PitwallError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::url::{BASE_URL, Endpoint, Query, endpoint_url};

/// Environment variable overriding the upstream base URL.
pub const BASE_URL_ENV: &str = "OPENF1_BASE_URL";

/// Configuration for the OpenF1 client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing resource path.
    pub base_url: String,
    /// Optional whole-request timeout. No timeout is applied when `None`.
    pub timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("pitwall/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Creates the default configuration, honouring `OPENF1_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => Self::new(base_url.trim()),
            _ => Self::default(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Errors that can occur while performing a single request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status.
    #[error("Server error: {status} for {url}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Body was not valid JSON for the expected records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RequestError> for PitwallError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Http(e) => Self::Http(e.to_string()),
            RequestError::ServerError { status, url } => Self::Status { status, url },
            RequestError::Json(e) => Self::Json(e),
        }
    }
}

/// Async client for the OpenF1 REST API.
///
/// Cloning is cheap and shares the connection pool. Every operation issues
/// its requests one after another; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct OpenF1Client {
    client: Client,
    config: ClientConfig,
}

impl OpenF1Client {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .user_agent(&config.user_agent)
            .gzip(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Creates a client from [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::from_env())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches and decodes every record of `endpoint` matching `query`.
    ///
    /// OpenF1 answers an empty selection with `404 {"detail": "No results
    /// found."}`; that response is returned as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PitwallError::Status`] for any other non-success status,
    /// [`PitwallError::Json`] for an undecodable body and
    /// [`PitwallError::Http`] when the request itself fails.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<Vec<T>, PitwallError> {
        let url = endpoint_url(&self.config.base_url, endpoint, query);
        let Some(body) = self.fetch(&url).await? else {
            debug!(%url, "no results");
            return Ok(Vec::new());
        };
        let records: Vec<T> = serde_json::from_slice(&body).map_err(RequestError::from)?;
        debug!(%url, bytes = body.len(), records = records.len(), "decoded response");
        Ok(records)
    }

    /// Downloads a response body.
    ///
    /// Returns `Ok(None)` for OpenF1's "no results" 404.
    async fn fetch(&self, url: &str) -> Result<Option<Bytes>, RequestError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(Some(response.bytes().await?));
        }

        if status == StatusCode::NOT_FOUND {
            let body = response.bytes().await?;
            if is_no_results(&body) {
                return Ok(None);
            }
        }

        Err(RequestError::ServerError {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Returns true if a 404 body is OpenF1's empty-selection marker.
fn is_no_results(body: &[u8]) -> bool {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }

    serde_json::from_slice::<Detail>(body)
        .is_ok_and(|d| d.detail.to_lowercase().starts_with("no results"))
}
