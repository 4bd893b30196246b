//! Flush scheduling for bulk mode
//!
//! Two independent triggers run the same flush cycle: a periodic timer
//! owned by [`FlushScheduler`], and the size trigger fired from the append
//! path once the buffer reaches its capacity. Both may race; each cycle
//! ships whatever the buffer holds at the moment it drains.

use crate::core::{RecordBuffer, Result, ShipperMetrics};
use crate::transport::{Delivery, DeliveryOutcome};
use crossbeam_channel::{bounded, select, tick, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Drain the buffer and ship its contents as one batch.
///
/// An empty drain is recorded but sends nothing. Returns the delivery
/// outcome when a request was made.
pub fn flush_cycle(
    buffer: &RecordBuffer,
    delivery: &Delivery,
    metrics: &ShipperMetrics,
) -> Option<DeliveryOutcome> {
    let batch = buffer.drain_snapshot();
    metrics.record_flush(batch.is_empty());
    delivery.deliver_batch(&batch)
}

/// Periodic flush trigger running on its own thread.
///
/// Every `interval` the scheduler calls its trigger; the loop ends when the
/// trigger returns `false` or the scheduler is cancelled. A scheduler that
/// is never cancelled runs for the life of the process.
///
/// # Example
///
/// ```
/// use log_shipper::shipper::FlushScheduler;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let ticks = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&ticks);
///
/// let mut scheduler = FlushScheduler::start(Duration::from_millis(10), move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     true
/// })
/// .expect("spawn scheduler");
///
/// std::thread::sleep(Duration::from_millis(100));
/// scheduler.cancel();
/// assert!(scheduler.join(Duration::from_secs(1)));
/// assert!(ticks.load(Ordering::SeqCst) > 0);
/// ```
pub struct FlushScheduler {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FlushScheduler {
    pub fn start<F>(interval: Duration, mut trigger: F) -> Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("log-shipper-flush".to_string())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            if !trigger() {
                                break;
                            }
                        }
                        // Fires on an explicit signal or when the sender is dropped
                        recv(cancel_rx) -> _ => break,
                    }
                }
            })?;

        Ok(Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the loop to stop. Does not wait.
    pub fn cancel(&mut self) {
        drop(self.cancel.take());
    }

    /// Wait up to `timeout` for the loop thread to exit after [`cancel`](Self::cancel)
    pub fn join(&mut self, timeout: Duration) -> bool {
        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                return handle.join().is_ok();
            }
            if start.elapsed() >= timeout {
                self.handle = Some(handle);
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for FlushScheduler {
    fn drop(&mut self) {
        // Stop the loop but never block the dropping thread on it
        self.cancel();
    }
}
