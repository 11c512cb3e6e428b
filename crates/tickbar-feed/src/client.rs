//! WebSocket client for a live price relay.

use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::UrlError;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tracing::{debug, info, warn};

use crate::{FeedStream, ParseError, WsError, event_stream};

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// WebSocket URL of the price relay.
    pub url: String,
    /// Timeout for a single connection attempt.
    pub connect_timeout: Duration,
    /// Maximum retry attempts for a failed connection.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:6789/".to_string(),
            connect_timeout: Duration::from_secs(10),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

/// Errors that can occur while receiving a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<WsError>),

    /// Connection attempt did not complete in time.
    #[error("Connection to {url} timed out after {timeout:?}")]
    ConnectTimeout {
        /// The URL being connected to.
        url: String,
        /// The configured timeout.
        timeout: Duration,
    },

    /// Connection failed after all retries.
    #[error("Failed to connect to {url} after {attempts} attempts: {source}")]
    Connect {
        /// The URL being connected to.
        url: String,
        /// Number of attempts made.
        attempts: u32,
        /// The last error seen.
        source: Box<Self>,
    },

    /// Received message could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Returns true if the stream can continue after this error.
    ///
    /// Malformed messages are skipped; transport failures end the feed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// WebSocket client with connect retry logic.
#[derive(Debug, Clone)]
pub struct FeedClient {
    config: FeedConfig,
}

impl FeedClient {
    /// Creates a new feed client with the given configuration.
    #[must_use]
    pub const fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Creates a client with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FeedConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Connects to the relay and returns its event stream.
    ///
    /// Failed connection attempts are retried with exponential backoff.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection could be established.
    pub async fn connect(&self) -> Result<FeedStream, FeedError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.connect_once().await {
                Ok(stream) => {
                    info!(url = %self.config.url, attempts, "connected to price feed");
                    return Ok(stream);
                }
                Err(e) if is_retryable(&e) && attempts <= self.config.max_retries => {
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(error = %e, attempts, ?delay, "feed connection failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(FeedError::Connect {
                        url: self.config.url.clone(),
                        attempts,
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    async fn connect_once(&self) -> Result<FeedStream, FeedError> {
        // Checked before any TCP connect so a bad scheme is never retried.
        let request = websocket_request(&self.config.url)?;
        debug!(url = %self.config.url, "attempting to establish WebSocket connection");
        let connecting = connect_async(request);
        let (websocket, _) = tokio::time::timeout(self.config.connect_timeout, connecting)
            .await
            .map_err(|_| FeedError::ConnectTimeout {
                url: self.config.url.clone(),
                timeout: self.config.connect_timeout,
            })?
            .map_err(Box::new)?;

        // Outbound half is unused; the relay only pushes.
        let (_, inbound) = websocket.split();
        Ok(event_stream(inbound))
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter (±25%)
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }
}

/// Builds the handshake request, accepting only `ws` and `wss` URLs.
fn websocket_request(url: &str) -> Result<Request, FeedError> {
    let request = url.into_client_request().map_err(Box::new)?;
    match request.uri().scheme_str() {
        Some("ws" | "wss") => Ok(request),
        _ => Err(FeedError::from(Box::new(WsError::Url(
            UrlError::UnsupportedUrlScheme,
        )))),
    }
}

/// Determines if a connection error is worth retrying.
fn is_retryable(error: &FeedError) -> bool {
    match error {
        FeedError::ConnectTimeout { .. } | FeedError::Io(_) => true,
        FeedError::WebSocket(ws) => match ws.as_ref() {
            WsError::Io(_) | WsError::ConnectionClosed => true,
            WsError::Http(response) => response.status().is_server_error(),
            _ => false,
        },
        _ => false,
    }
}
