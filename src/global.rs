//! Process-wide shipper
//!
//! Applications that want one shipper reachable from anywhere configure it
//! once at startup. The first successful [`configure`] call wins; later
//! calls return the existing shipper and ignore their arguments, including
//! when several threads race to configure.
//!
//! ```no_run
//! use log_shipper::{global, ShipperConfig};
//!
//! let mut config = ShipperConfig::new("TOKEN");
//! config.tags = vec!["svc".to_string()];
//! log_shipper::configure(config).expect("valid configuration");
//!
//! global::warn("disk low");
//! ```

use crate::core::{LogLevel, LogRecord, Result, ShipperConfig};
use crate::shipper::{LogShipper, ShipperBuilder};
use crate::sinks::{ConsoleEcho, EchoSink};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;

static SHIPPER: OnceLock<LogShipper> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Configure the process-wide shipper from `config`
///
/// Returns the shipper that is installed after the call: the new one on the
/// first successful call, the existing one on every later call.
pub fn configure(config: ShipperConfig) -> Result<&'static LogShipper> {
    configure_with(LogShipper::builder_from(config))
}

/// Configure the process-wide shipper from a builder
pub fn configure_with(builder: ShipperBuilder) -> Result<&'static LogShipper> {
    if let Some(shipper) = SHIPPER.get() {
        return Ok(shipper);
    }

    // Serializes builders so losing callers never spawn workers of their own
    let _guard = INIT_LOCK.lock();
    if let Some(shipper) = SHIPPER.get() {
        return Ok(shipper);
    }

    let shipper = builder.build()?;
    Ok(SHIPPER.get_or_init(|| shipper))
}

/// The configured shipper, if any
pub fn get() -> Option<&'static LogShipper> {
    SHIPPER.get()
}

pub fn is_configured() -> bool {
    SHIPPER.get().is_some()
}

/// Shut the process-wide shipper down; see [`LogShipper::shutdown`]
///
/// Returns `true` when nothing is configured.
pub fn shutdown(timeout: Duration) -> bool {
    SHIPPER.get().map_or(true, |shipper| shipper.shutdown(timeout))
}

/// Echo-only fallback used before configuration: nothing is shipped
fn echo_unconfigured(level: LogLevel, record: LogRecord) {
    if !level.passes(LogLevel::default()) {
        return;
    }
    ConsoleEcho::new().write_line(level, &record.echo_line());
    if level == LogLevel::Fatal {
        std::process::exit(1);
    }
}

pub fn log(level: LogLevel, message: impl Into<String>) {
    match SHIPPER.get() {
        Some(shipper) => shipper.log(level, message),
        None => echo_unconfigured(level, LogRecord::new(level, message, None)),
    }
}

pub fn log_with<T: Serialize + ?Sized>(level: LogLevel, message: impl Into<String>, data: &T) {
    match SHIPPER.get() {
        Some(shipper) => shipper.log_with(level, message, data),
        None => {
            let metadata = serde_json::to_value(data).ok();
            echo_unconfigured(level, LogRecord::new(level, message, metadata));
        }
    }
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

/// Log at fatal level, then exit the process with status 1
pub fn fatal(message: impl Into<String>) {
    log(LogLevel::Fatal, message);
}

pub fn debug_with<T: Serialize + ?Sized>(message: impl Into<String>, data: &T) {
    log_with(LogLevel::Debug, message, data);
}

pub fn info_with<T: Serialize + ?Sized>(message: impl Into<String>, data: &T) {
    log_with(LogLevel::Info, message, data);
}

pub fn warn_with<T: Serialize + ?Sized>(message: impl Into<String>, data: &T) {
    log_with(LogLevel::Warn, message, data);
}

pub fn error_with<T: Serialize + ?Sized>(message: impl Into<String>, data: &T) {
    log_with(LogLevel::Error, message, data);
}

pub fn fatal_with<T: Serialize + ?Sized>(message: impl Into<String>, data: &T) {
    log_with(LogLevel::Fatal, message, data);
}
