//! Shared test doubles: a transport that records payloads and an echo sink
//! that captures lines.

#![allow(dead_code)]

use crossbeam_channel::{unbounded, Receiver, Sender};
use log_shipper::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Transport that forwards every payload to a channel and answers with a fixed outcome
pub struct RecordingTransport {
    endpoint: String,
    outcome: DeliveryOutcome,
    sent: Sender<String>,
}

impl RecordingTransport {
    pub fn new(endpoint: impl Into<String>) -> (Self, Receiver<String>) {
        Self::with_outcome(endpoint, DeliveryOutcome::Delivered(200))
    }

    pub fn with_outcome(
        endpoint: impl Into<String>,
        outcome: DeliveryOutcome,
    ) -> (Self, Receiver<String>) {
        let (sent, received) = unbounded();
        (
            Self {
                endpoint: endpoint.into(),
                outcome,
                sent,
            },
            received,
        )
    }
}

impl Transport for RecordingTransport {
    fn send(&self, payload: Vec<u8>) -> DeliveryOutcome {
        let _ = self.sent.send(String::from_utf8_lossy(&payload).into_owned());
        self.outcome.clone()
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Echo sink keeping every line and diagnostic in memory
#[derive(Clone, Default)]
pub struct CapturingEcho {
    pub lines: Arc<Mutex<Vec<String>>>,
    pub diagnostics: Arc<Mutex<Vec<String>>>,
}

impl EchoSink for CapturingEcho {
    fn write_line(&self, _level: LogLevel, line: &str) {
        self.lines.lock().push(line.to_string());
    }

    fn diagnostic(&self, message: &str) {
        self.diagnostics.lock().push(message.to_string());
    }

    fn name(&self) -> &str {
        "capturing"
    }
}

/// Builder preloaded with the given config and a recording transport for its endpoint
pub fn recorded(
    config: ShipperConfig,
) -> (ShipperBuilder, Receiver<String>, CapturingEcho) {
    let (transport, received) = RecordingTransport::new(config.endpoint_url());
    let echo = CapturingEcho::default();
    let builder = LogShipper::builder_from(config)
        .transport(transport)
        .echo(echo.clone())
        .on_fatal(Arc::new(|| {}));
    (builder, received, echo)
}

/// Time allowed for detached deliveries to show up
pub const DELIVERY_WAIT: Duration = Duration::from_secs(3);

/// Wait long enough to be confident nothing else is coming
pub const QUIET_WAIT: Duration = Duration::from_millis(200);
