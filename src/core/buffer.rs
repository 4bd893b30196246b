//! Pending-record buffer for bulk mode
//!
//! A single exclusive lock guards every read and mutation. `drain_snapshot`
//! detaches the contents and leaves an empty vector in the same critical
//! section, so an append either lands before the drain (and ships with that
//! batch) or after it (and waits for the next one). No append can be accepted
//! into a vector that is about to be discarded.

use super::log_record::LogRecord;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct RecordBuffer {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the backing vector for the expected flush threshold
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append a record and return the resulting length
    pub fn append(&self, record: LogRecord) -> usize {
        let mut records = self.records.lock();
        records.push(record);
        records.len()
    }

    /// Detach everything currently buffered, in insertion order
    pub fn drain_snapshot(&self) -> Vec<LogRecord> {
        let mut records = self.records.lock();
        let capacity = records.capacity();
        std::mem::replace(&mut *records, Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn record(message: &str) -> LogRecord {
        LogRecord::new(LogLevel::Info, message, None)
    }

    #[test]
    fn test_append_returns_new_length() {
        let buffer = RecordBuffer::new();
        assert_eq!(buffer.append(record("a")), 1);
        assert_eq!(buffer.append(record("b")), 2);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_drain_preserves_insertion_order() {
        let buffer = RecordBuffer::with_capacity(3);
        for message in ["a", "b", "c"] {
            buffer.append(record(message));
        }

        let drained: Vec<String> = buffer
            .drain_snapshot()
            .iter()
            .map(|r| r.message().to_string())
            .collect();
        assert_eq!(drained, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_second_drain_is_empty() {
        let buffer = RecordBuffer::new();
        buffer.append(record("only"));

        assert_eq!(buffer.drain_snapshot().len(), 1);
        assert!(buffer.drain_snapshot().is_empty());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let buffer = Arc::new(RecordBuffer::new());
        let mut handles = vec![];

        for t in 0..8 {
            let buffer = Arc::clone(&buffer);
            handles.push(thread::spawn(move || {
                for i in 0..250 {
                    buffer.append(record(&format!("{}-{}", t, i)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let drained = buffer.drain_snapshot();
        assert_eq!(drained.len(), 2000);

        let unique: HashSet<&str> = drained.iter().map(|r| r.message()).collect();
        assert_eq!(unique.len(), 2000);
    }

    #[test]
    fn test_concurrent_drains_partition_records() {
        let buffer = Arc::new(RecordBuffer::new());
        let writer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for i in 0..5000 {
                    buffer.append(record(&i.to_string()));
                }
            })
        };
        let drainer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                let mut seen = Vec::new();
                for _ in 0..200 {
                    seen.extend(buffer.drain_snapshot());
                    thread::yield_now();
                }
                seen
            })
        };

        writer.join().unwrap();
        let mut seen = drainer.join().unwrap();
        seen.extend(buffer.drain_snapshot());

        // Every record is drained exactly once
        assert_eq!(seen.len(), 5000);
        let unique: HashSet<&str> = seen.iter().map(|r| r.message()).collect();
        assert_eq!(unique.len(), 5000);
    }
}
