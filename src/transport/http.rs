//! HTTP transport for remote ingestion
//!
//! Posts payloads to the configured ingestion URL with a blocking client.
//! Requests run on delivery worker threads, never on the logging caller.

use super::{DeliveryOutcome, Transport};
use crate::core::{Result, ShipperConfig};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// HTTP transport that posts each payload once
///
/// # Example
///
/// ```no_run
/// use log_shipper::transport::{HttpTransport, Transport};
/// use std::time::Duration;
///
/// let transport = HttpTransport::new(
///     "https://logs-01.loggly.com/inputs/TOKEN/tag/svc/",
///     Duration::from_secs(5),
/// )
/// .expect("Failed to build HTTP client");
///
/// let outcome = transport.send(br#"{"message":"hello"}"#.to_vec());
/// println!("{}", outcome);
/// ```
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport for `url`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a transport for the URL and timeout derived from `config`
    pub fn from_config(config: &ShipperConfig) -> Result<Self> {
        Self::new(config.endpoint_url(), config.request_timeout)
    }
}

impl Transport for HttpTransport {
    fn send(&self, payload: Vec<u8>) -> DeliveryOutcome {
        let result = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain")
            .body(payload)
            .send();

        match result {
            Ok(response) => DeliveryOutcome::from_status(response.status().as_u16()),
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn name(&self) -> &str {
        "http"
    }
}
