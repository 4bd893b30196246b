//! Wire encoding of records
//!
//! Immediate mode sends one JSON object per request. Bulk mode sends one
//! JSON object per line, each line terminated by `\n`, in buffer order.

use crate::core::{LogRecord, Result};

/// Encode one record as a JSON object
pub fn encode_single(record: &LogRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(record)?)
}

/// Encode records as newline-delimited JSON.
///
/// Records that fail to encode are skipped and returned alongside the body
/// so the caller can report them; the rest of the batch still ships.
pub fn encode_batch(records: &[LogRecord]) -> (Vec<u8>, Vec<serde_json::Error>) {
    let mut body = Vec::with_capacity(records.len() * 128);
    let mut failures = Vec::new();

    for record in records {
        match serde_json::to_vec(record) {
            Ok(line) => {
                body.extend_from_slice(&line);
                body.push(b'\n');
            }
            Err(e) => failures.push(e),
        }
    }

    (body, failures)
}
