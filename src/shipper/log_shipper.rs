//! Main log shipper implementation

use super::dispatcher::{Dispatcher, Job, WorkerContext};
use super::scheduler::{flush_cycle, FlushScheduler};
use crate::core::{
    LogLevel, LogRecord, RecordBuffer, Result, ShipperConfig, ShipperError, ShipperMetrics,
};
use crate::sinks::{ConsoleEcho, EchoSink};
use crate::transport::{Delivery, DeliveryOutcome, HttpTransport, Transport};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default timeout for [`LogShipper::shutdown`]
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Action taken after a fatal event has been dispatched
pub type FatalHandler = Arc<dyn Fn() + Send + Sync>;

/// A configured log shipper.
///
/// Every accepted call is echoed locally on the calling thread. Shipping is
/// detached: in immediate mode each record is queued for its own request, in
/// bulk mode it is appended to the buffer and shipped by the next flush
/// cycle. Logging calls never block on the network and never fail.
pub struct LogShipper {
    config: ShipperConfig,
    endpoint: String,
    echo: Arc<dyn EchoSink>,
    metrics: Arc<ShipperMetrics>,
    delivery: Delivery,
    buffer: Option<Arc<RecordBuffer>>,
    dispatcher: Dispatcher,
    scheduler: Mutex<Option<FlushScheduler>>,
    on_fatal: FatalHandler,
    closed_reported: AtomicBool,
}

impl LogShipper {
    /// Build a shipper posting to the configured endpoint over HTTP
    pub fn new(config: ShipperConfig) -> Result<Self> {
        LogShipper::builder_from(config).build()
    }

    fn start(
        config: ShipperConfig,
        transport: Arc<dyn Transport>,
        echo: Arc<dyn EchoSink>,
        on_fatal: FatalHandler,
    ) -> Result<Self> {
        config.validate()?;

        let metrics = Arc::new(ShipperMetrics::new());
        let delivery = Delivery::new(
            Arc::clone(&transport),
            Arc::clone(&echo),
            Arc::clone(&metrics),
            config.debug_echo,
        );
        let buffer = config
            .bulk
            .then(|| Arc::new(RecordBuffer::with_capacity(config.buffer_capacity)));

        let dispatcher = Dispatcher::start(
            config.delivery_workers,
            WorkerContext {
                delivery: delivery.clone(),
                buffer: buffer.clone(),
                metrics: Arc::clone(&metrics),
                echo: Arc::clone(&echo),
            },
        )?;

        let scheduler = if config.bulk {
            let jobs = dispatcher.job_sender().ok_or(ShipperError::DispatcherClosed)?;
            // Stops by itself once the worker queue is closed
            let scheduler = FlushScheduler::start(config.flush_interval, move || {
                jobs.send(Job::Flush).is_ok()
            })?;
            Some(scheduler)
        } else {
            None
        };

        Ok(Self {
            endpoint: transport.endpoint().to_string(),
            config,
            echo,
            metrics,
            delivery,
            buffer,
            dispatcher,
            scheduler: Mutex::new(scheduler),
            on_fatal,
            closed_reported: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &ShipperConfig {
        &self.config
    }

    /// URL records are shipped to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    pub fn is_bulk(&self) -> bool {
        self.buffer.is_some()
    }

    /// Records waiting in the bulk buffer (always 0 in immediate mode)
    pub fn buffered_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Get the shipper metrics for detailed observability
    pub fn metrics(&self) -> &ShipperMetrics {
        &self.metrics
    }

    /// Whether an event at `level` would be echoed and shipped
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.config.level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        self.emit(LogRecord::new(level, message, None));
    }

    /// Log with a structured value carried as the record's metadata
    pub fn log_with<T>(&self, level: LogLevel, message: impl Into<String>, data: &T)
    where
        T: Serialize + ?Sized,
    {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let message = message.into();
        match serde_json::to_value(data) {
            Ok(metadata) => self.emit(LogRecord::new(level, message, Some(metadata))),
            Err(e) => {
                // Still echoed, but a record without its data is not shipped
                let record = LogRecord::new(level, message, None);
                self.metrics.record_accepted();
                self.metrics.record_serialization_failure();
                self.echo.write_line(level, &record.echo_line());
                self.echo.diagnostic(&format!(
                    "There was an error marshalling log metadata, event not shipped: {}",
                    e
                ));
                if level == LogLevel::Fatal {
                    (self.on_fatal)();
                }
            }
        }
    }

    fn emit(&self, record: LogRecord) {
        let level = record.level();

        self.metrics.record_accepted();
        self.echo.write_line(level, &record.echo_line());
        self.ship(record);

        if level == LogLevel::Fatal {
            (self.on_fatal)();
        }
    }

    fn ship(&self, record: LogRecord) {
        // Nothing drains the buffer once the workers are gone
        if self.dispatcher.is_closed() {
            self.report_closed();
            return;
        }

        let dispatched = match self.buffer {
            None => self.dispatcher.dispatch(Job::Deliver(record)),
            Some(ref buffer) => {
                let len = buffer.append(record);
                if len >= self.config.buffer_capacity {
                    self.dispatcher.dispatch(Job::Flush)
                } else {
                    Ok(())
                }
            }
        };

        if dispatched.is_err() {
            self.report_closed();
        }
    }

    /// Report the closed worker queue once per shipper
    fn report_closed(&self) {
        if self.config.debug_echo && !self.closed_reported.swap(true, Ordering::Relaxed) {
            self.echo.diagnostic(
                "Shipper is shut down: log events are echoed but no longer shipped",
            );
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at fatal level, then run the fatal handler (process exit by default)
    ///
    /// Shipping is dispatched before the handler runs but is not awaited.
    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn debug_with<T: Serialize + ?Sized>(&self, message: impl Into<String>, data: &T) {
        self.log_with(LogLevel::Debug, message, data);
    }

    pub fn info_with<T: Serialize + ?Sized>(&self, message: impl Into<String>, data: &T) {
        self.log_with(LogLevel::Info, message, data);
    }

    pub fn warn_with<T: Serialize + ?Sized>(&self, message: impl Into<String>, data: &T) {
        self.log_with(LogLevel::Warn, message, data);
    }

    pub fn error_with<T: Serialize + ?Sized>(&self, message: impl Into<String>, data: &T) {
        self.log_with(LogLevel::Error, message, data);
    }

    pub fn fatal_with<T: Serialize + ?Sized>(&self, message: impl Into<String>, data: &T) {
        self.log_with(LogLevel::Fatal, message, data);
    }

    /// Run one flush cycle on the calling thread
    ///
    /// Returns the delivery outcome, or `None` in immediate mode or when
    /// the buffer was empty.
    pub fn flush(&self) -> Option<DeliveryOutcome> {
        let buffer = self.buffer.as_ref()?;
        flush_cycle(buffer, &self.delivery, &self.metrics)
    }

    /// Stop the periodic flush without touching anything else
    ///
    /// Buffered records then ship only through the size trigger, an explicit
    /// [`flush`](Self::flush), or [`shutdown`](Self::shutdown).
    pub fn cancel_flush_scheduler(&self) {
        if let Some(ref mut scheduler) = *self.scheduler.lock() {
            scheduler.cancel();
        }
    }

    /// Gracefully shut the shipper down with a custom timeout
    ///
    /// Cancels the periodic flush, stops accepting delivery jobs, ships
    /// whatever is still buffered, and waits for queued deliveries to finish.
    /// Log calls made afterwards are still echoed but no longer shipped.
    ///
    /// # Returns
    ///
    /// `true` if everything finished within `timeout`, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use log_shipper::{LogShipper, DEFAULT_SHUTDOWN_TIMEOUT};
    ///
    /// let shipper = LogShipper::builder("TOKEN").bulk(true).build().expect("valid config");
    /// shipper.info("Important message");
    ///
    /// if !shipper.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
    ///     eprintln!("Warning: log shipper shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let start = Instant::now();

        let mut scheduler_stopped = true;
        if let Some(mut scheduler) = self.scheduler.lock().take() {
            scheduler.cancel();
            scheduler_stopped = scheduler.join(timeout);
        }

        self.dispatcher.close();
        self.flush();

        let remaining = timeout.saturating_sub(start.elapsed());
        let workers_stopped = self.dispatcher.join(remaining);

        if !workers_stopped && self.config.debug_echo {
            self.echo.diagnostic(
                "Delivery workers did not finish within timeout. Some logs may be lost.",
            );
        }

        scheduler_stopped && workers_stopped
    }
}

impl Drop for LogShipper {
    fn drop(&mut self) {
        // Best effort: stop triggering flushes and let queued work finish
        // on the detached workers. Buffered records are not shipped here.
        self.cancel_flush_scheduler();
        self.dispatcher.close();
    }
}

/// Builder for constructing a [`LogShipper`] with a fluent API
///
/// # Example
/// ```no_run
/// use log_shipper::prelude::*;
/// use std::time::Duration;
///
/// let shipper = LogShipper::builder("TOKEN")
///     .level(LogLevel::Debug)
///     .tags(["api", "production"])
///     .bulk(true)
///     .buffer_capacity(500)
///     .flush_interval(Duration::from_secs(5))
///     .debug_echo(true)
///     .build()
///     .expect("valid configuration");
/// ```
pub struct ShipperBuilder {
    config: ShipperConfig,
    transport: Option<Arc<dyn Transport>>,
    echo: Option<Arc<dyn EchoSink>>,
    on_fatal: Option<FatalHandler>,
}

impl ShipperBuilder {
    /// Create a new builder with default values and the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self::from_config(ShipperConfig::new(token))
    }

    /// Start from an existing configuration
    pub fn from_config(config: ShipperConfig) -> Self {
        Self {
            config,
            transport: None,
            echo: None,
            on_fatal: None,
        }
    }

    /// Set the minimum level that is echoed and shipped
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Enable bulk mode (buffer + periodic batch upload)
    #[must_use = "builder methods return a new value"]
    pub fn bulk(mut self, bulk: bool) -> Self {
        self.config.bulk = bulk;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn debug_echo(mut self, debug_echo: bool) -> Self {
        self.config.debug_echo = debug_echo;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn endpoint_base(mut self, base: impl Into<String>) -> Self {
        self.config.endpoint_base = base.into();
        self
    }

    /// Buffer length that triggers a bulk flush
    #[must_use = "builder methods return a new value"]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Period of the time-triggered bulk flush
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.config.flush_interval = interval;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn delivery_workers(mut self, workers: usize) -> Self {
        self.config.delivery_workers = workers;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Color the level tag in console echo lines
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, colors: bool) -> Self {
        self.config.colors = colors;
        self
    }

    /// Replace the HTTP transport
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Replace the HTTP transport with a shared one
    #[must_use = "builder methods return a new value"]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the console echo
    #[must_use = "builder methods return a new value"]
    pub fn echo<E: EchoSink + 'static>(mut self, echo: E) -> Self {
        self.echo = Some(Arc::new(echo));
        self
    }

    /// Replace the console echo with a shared sink
    #[must_use = "builder methods return a new value"]
    pub fn shared_echo(mut self, echo: Arc<dyn EchoSink>) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Set the action run after a fatal event is dispatched
    ///
    /// Default: `std::process::exit(1)`.
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = Some(handler);
        self
    }

    pub fn config(&self) -> &ShipperConfig {
        &self.config
    }

    /// Build the shipper, starting its workers and, in bulk mode, its flush scheduler
    pub fn build(self) -> Result<LogShipper> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_config(&self.config)?),
        };
        let echo: Arc<dyn EchoSink> = match self.echo {
            Some(echo) => echo,
            None => Arc::new(ConsoleEcho::with_colors(self.config.colors)),
        };
        let on_fatal = self
            .on_fatal
            .unwrap_or_else(|| Arc::new(|| std::process::exit(1)));

        LogShipper::start(self.config, transport, echo, on_fatal)
    }
}

impl LogShipper {
    /// Create a builder for LogShipper
    #[must_use]
    pub fn builder(token: impl Into<String>) -> ShipperBuilder {
        ShipperBuilder::new(token)
    }

    /// Create a builder starting from an existing configuration
    #[must_use]
    pub fn builder_from(config: ShipperConfig) -> ShipperBuilder {
        ShipperBuilder::from_config(config)
    }
}
