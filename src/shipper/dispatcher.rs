//! Background delivery workers
//!
//! Log calls hand work to a small pool of named threads through an unbounded
//! channel and return immediately. Workers execute single deliveries and
//! flush cycles; a panic inside one job is contained so the worker keeps
//! serving the queue.

use super::scheduler::flush_cycle;
use crate::core::{LogRecord, RecordBuffer, Result, ShipperError, ShipperMetrics};
use crate::sinks::EchoSink;
use crate::transport::Delivery;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Work item executed by a delivery worker
#[derive(Debug)]
pub enum Job {
    /// Send one record in its own request
    Deliver(LogRecord),
    /// Drain the buffer and send whatever it held as one batch
    Flush,
}

/// State shared by every worker
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub(crate) delivery: Delivery,
    pub(crate) buffer: Option<Arc<RecordBuffer>>,
    pub(crate) metrics: Arc<ShipperMetrics>,
    pub(crate) echo: Arc<dyn EchoSink>,
}

impl WorkerContext {
    fn run(&self, job: Job) {
        match job {
            Job::Deliver(record) => {
                self.delivery.deliver_one(&record);
            }
            Job::Flush => {
                if let Some(ref buffer) = self.buffer {
                    flush_cycle(buffer, &self.delivery, &self.metrics);
                }
            }
        }
    }

    fn run_isolated(&self, job: Job) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.run(job)));

        if let Err(panic_info) = result {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            self.echo.diagnostic(&format!(
                "Delivery job panicked: {}. Worker continues with the next job.",
                panic_msg
            ));
        }
    }
}

pub struct Dispatcher {
    sender: RwLock<Option<Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Spawn `worker_count` delivery threads
    pub(crate) fn start(worker_count: usize, context: WorkerContext) -> Result<Self> {
        let (sender, receiver) = unbounded::<Job>();
        let mut workers = Vec::with_capacity(worker_count);

        for idx in 0..worker_count {
            let receiver: Receiver<Job> = receiver.clone();
            let context = context.clone();
            let handle = thread::Builder::new()
                .name(format!("log-shipper-worker-{}", idx))
                .spawn(move || {
                    // Ends once every sender is gone and the queue is empty
                    for job in receiver.iter() {
                        context.run_isolated(job);
                    }
                })?;
            workers.push(handle);
        }

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            workers: Mutex::new(workers),
        })
    }

    /// Queue a job without waiting for it
    pub fn dispatch(&self, job: Job) -> Result<()> {
        match self.sender.read().as_ref() {
            Some(sender) => sender.send(job).map_err(|_| ShipperError::DispatcherClosed),
            None => Err(ShipperError::DispatcherClosed),
        }
    }

    /// A sender for components that enqueue on their own, such as the flush scheduler
    pub fn job_sender(&self) -> Option<Sender<Job>> {
        self.sender.read().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Stop accepting jobs. Queued jobs still run.
    pub fn close(&self) {
        drop(self.sender.write().take());
    }

    /// Wait up to `timeout` for the workers to finish the queue
    ///
    /// Returns `true` if every worker exited in time. Only meaningful after
    /// [`Dispatcher::close`] and after every other job sender is dropped.
    pub fn join(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        let mut workers = self.workers.lock();

        while let Some(handle) = workers.pop() {
            loop {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    // Keep the handle so a later join can still collect it
                    workers.push(handle);
                    return false;
                }

                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }
        }

        true
    }
}
