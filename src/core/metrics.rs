//! Shipper metrics for observability
//!
//! Counters describing what happened to log events after they were handed
//! to the shipper: filtered by level, delivered, rejected by the endpoint,
//! or lost to transport and serialization errors.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters for shipper health.
///
/// All counters are monotonic and use relaxed ordering; they are meant for
/// monitoring, not for synchronization.
///
/// # Example
///
/// ```
/// use log_shipper::ShipperMetrics;
///
/// let metrics = ShipperMetrics::new();
/// metrics.record_accepted();
/// metrics.record_delivered(3);
///
/// assert_eq!(metrics.accepted(), 1);
/// assert_eq!(metrics.records_shipped(), 3);
/// ```
#[derive(Debug)]
pub struct ShipperMetrics {
    /// Events that passed the level threshold
    accepted: AtomicU64,

    /// Events dropped by the level threshold
    filtered: AtomicU64,

    /// Records carried by requests that got a 2xx response
    records_shipped: AtomicU64,

    /// Requests answered with 2xx
    deliveries_ok: AtomicU64,

    /// Requests answered with 403
    auth_failures: AtomicU64,

    /// Requests answered with any other non-2xx status
    rejected: AtomicU64,

    /// Requests that got no response at all
    transport_errors: AtomicU64,

    /// Events or batches that could not be encoded
    serialization_failures: AtomicU64,

    /// Flush cycles run, empty or not
    flush_cycles: AtomicU64,

    /// Flush cycles that found nothing to send
    empty_flushes: AtomicU64,
}

impl ShipperMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            records_shipped: AtomicU64::new(0),
            deliveries_ok: AtomicU64::new(0),
            auth_failures: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            transport_errors: AtomicU64::new(0),
            serialization_failures: AtomicU64::new(0),
            flush_cycles: AtomicU64::new(0),
            empty_flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_shipped(&self) -> u64 {
        self.records_shipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries_ok(&self) -> u64 {
        self.deliveries_ok.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn auth_failures(&self) -> u64 {
        self.auth_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_errors(&self) -> u64 {
        self.transport_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn serialization_failures(&self) -> u64 {
        self.serialization_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_cycles(&self) -> u64 {
        self.flush_cycles.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn empty_flushes(&self) -> u64 {
        self.empty_flushes.load(Ordering::Relaxed)
    }

    /// Total requests that reached the endpoint or failed trying
    pub fn delivery_attempts(&self) -> u64 {
        self.deliveries_ok() + self.auth_failures() + self.rejected() + self.transport_errors()
    }

    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a 2xx response carrying `records` events
    #[inline]
    pub fn record_delivered(&self, records: usize) -> u64 {
        self.records_shipped.fetch_add(records as u64, Ordering::Relaxed);
        self.deliveries_ok.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_auth_failure(&self) -> u64 {
        self.auth_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_error(&self) -> u64 {
        self.transport_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_serialization_failure(&self) -> u64 {
        self.serialization_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a flush cycle; `empty` when the drain returned nothing
    #[inline]
    pub fn record_flush(&self, empty: bool) -> u64 {
        if empty {
            self.empty_flushes.fetch_add(1, Ordering::Relaxed);
        }
        self.flush_cycles.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for ShipperMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ShipperMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            accepted: AtomicU64::new(self.accepted()),
            filtered: AtomicU64::new(self.filtered()),
            records_shipped: AtomicU64::new(self.records_shipped()),
            deliveries_ok: AtomicU64::new(self.deliveries_ok()),
            auth_failures: AtomicU64::new(self.auth_failures()),
            rejected: AtomicU64::new(self.rejected()),
            transport_errors: AtomicU64::new(self.transport_errors()),
            serialization_failures: AtomicU64::new(self.serialization_failures()),
            flush_cycles: AtomicU64::new(self.flush_cycles()),
            empty_flushes: AtomicU64::new(self.empty_flushes()),
        }
    }
}
