//! Outbound delivery of encoded log payloads

pub mod delivery;
pub mod http;
pub mod payload;

pub use delivery::Delivery;
pub use http::HttpTransport;

use std::fmt;

/// Result of one outbound request. None of them is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint answered with a 2xx status
    Delivered(u16),
    /// The endpoint answered 403: the token is invalid
    Unauthorized,
    /// The endpoint answered with any other non-2xx status
    Rejected(u16),
    /// No response was received
    Failed(String),
}

impl DeliveryOutcome {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => DeliveryOutcome::Delivered(status),
            403 => DeliveryOutcome::Unauthorized,
            other => DeliveryOutcome::Rejected(other),
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered(status) => write!(f, "delivered ({})", status),
            DeliveryOutcome::Unauthorized => write!(f, "unauthorized (403)"),
            DeliveryOutcome::Rejected(status) => write!(f, "rejected ({})", status),
            DeliveryOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A single-shot sender of encoded payloads.
///
/// Implementations perform exactly one request per call and report what
/// happened; they never retry and never panic on network failures.
pub trait Transport: Send + Sync {
    /// Send `payload` as one request with content type `text/plain`
    fn send(&self, payload: Vec<u8>) -> DeliveryOutcome;

    /// URL the payloads are posted to
    fn endpoint(&self) -> &str;

    fn name(&self) -> &str;
}
