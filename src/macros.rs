//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```no_run
//! use log_shipper::prelude::*;
//! use log_shipper::info;
//!
//! let shipper = LogShipper::builder("TOKEN").build().unwrap();
//!
//! // Basic logging
//! info!(shipper, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(shipper, "Server listening on port {}", port);
//!
//! // Through the process-wide shipper
//! info!(global, "Worker {} ready", 3);
//! ```

/// Log a message with automatic formatting.
///
/// The first argument is a shipper, or the bare word `global` to log through
/// the process-wide shipper.
#[macro_export]
macro_rules! log {
    (global, $level:expr, $($arg:tt)+) => {
        $crate::global::log($level, format!($($arg)+))
    };
    ($shipper:expr, $level:expr, $($arg:tt)+) => {
        $shipper.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    (global, $($arg:tt)+) => {
        $crate::log!(global, $crate::LogLevel::Debug, $($arg)+)
    };
    ($shipper:expr, $($arg:tt)+) => {
        $crate::log!($shipper, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    (global, $($arg:tt)+) => {
        $crate::log!(global, $crate::LogLevel::Info, $($arg)+)
    };
    ($shipper:expr, $($arg:tt)+) => {
        $crate::log!($shipper, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    (global, $($arg:tt)+) => {
        $crate::log!(global, $crate::LogLevel::Warn, $($arg)+)
    };
    ($shipper:expr, $($arg:tt)+) => {
        $crate::log!($shipper, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    (global, $($arg:tt)+) => {
        $crate::log!(global, $crate::LogLevel::Error, $($arg)+)
    };
    ($shipper:expr, $($arg:tt)+) => {
        $crate::log!($shipper, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run the shipper's fatal handler.
#[macro_export]
macro_rules! fatal {
    (global, $($arg:tt)+) => {
        $crate::log!(global, $crate::LogLevel::Fatal, $($arg)+)
    };
    ($shipper:expr, $($arg:tt)+) => {
        $crate::log!($shipper, $crate::LogLevel::Fatal, $($arg)+)
    };
}
