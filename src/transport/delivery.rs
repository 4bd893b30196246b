//! Delivery of single records and batches
//!
//! Wraps a [`Transport`] with encoding, outcome reporting, and metrics. A
//! delivery never retries and never requeues: every outcome is final.

use super::payload;
use super::{DeliveryOutcome, Transport};
use crate::core::{LogRecord, ShipperMetrics};
use crate::sinks::EchoSink;
use std::sync::Arc;

#[derive(Clone)]
pub struct Delivery {
    transport: Arc<dyn Transport>,
    echo: Arc<dyn EchoSink>,
    metrics: Arc<ShipperMetrics>,
    debug_echo: bool,
}

impl Delivery {
    pub fn new(
        transport: Arc<dyn Transport>,
        echo: Arc<dyn EchoSink>,
        metrics: Arc<ShipperMetrics>,
        debug_echo: bool,
    ) -> Self {
        Self {
            transport,
            echo,
            metrics,
            debug_echo,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Encode and send one record.
    ///
    /// Returns `None` when the record could not be encoded and nothing was
    /// sent.
    pub fn deliver_one(&self, record: &LogRecord) -> Option<DeliveryOutcome> {
        let body = match payload::encode_single(record) {
            Ok(body) => body,
            Err(e) => {
                self.metrics.record_serialization_failure();
                self.echo
                    .diagnostic(&format!("There was an error marshalling log message: {}", e));
                return None;
            }
        };

        let outcome = self.transport.send(body);
        self.report(&outcome, 1, "Log was");
        Some(outcome)
    }

    /// Encode and send records as one newline-delimited batch.
    ///
    /// Returns `None` when there was nothing to send, either because
    /// `records` is empty or because no record could be encoded.
    pub fn deliver_batch(&self, records: &[LogRecord]) -> Option<DeliveryOutcome> {
        if records.is_empty() {
            return None;
        }

        let (body, failures) = payload::encode_batch(records);
        for e in &failures {
            self.metrics.record_serialization_failure();
            self.echo
                .diagnostic(&format!("There was an error marshalling buffer message: {}", e));
        }
        if body.is_empty() {
            return None;
        }

        let shipped = records.len() - failures.len();
        let outcome = self.transport.send(body);
        self.report(&outcome, shipped, "Logs were");
        Some(outcome)
    }

    fn report(&self, outcome: &DeliveryOutcome, records: usize, subject: &str) {
        match outcome {
            DeliveryOutcome::Delivered(status) => {
                self.metrics.record_delivered(records);
                if self.debug_echo {
                    self.echo
                        .diagnostic(&format!("{} shipped successfully ({})", subject, status));
                }
            }
            DeliveryOutcome::Unauthorized => {
                self.metrics.record_auth_failure();
                if self.debug_echo {
                    self.echo.diagnostic("Token is invalid (403)");
                }
            }
            DeliveryOutcome::Rejected(status) => {
                self.metrics.record_rejected();
                if self.debug_echo {
                    self.echo.diagnostic(&format!(
                        "Ingestion endpoint rejected {} record(s) with status {}",
                        records, status
                    ));
                }
            }
            DeliveryOutcome::Failed(reason) => {
                self.metrics.record_transport_error();
                if self.debug_echo {
                    self.echo.diagnostic(&format!(
                        "There was an error shipping the logs to {}: {}",
                        self.endpoint(),
                        reason
                    ));
                }
            }
        }
    }
}
