//! # Log Shipper
//!
//! A process-local log shipping client. Leveled log events are printed
//! locally right away and forwarded asynchronously to an HTTP ingestion
//! endpoint, either one request per event or batched into bulk uploads.
//!
//! ## Features
//!
//! - **Non-blocking**: logging calls never wait on the network
//! - **Two delivery modes**: immediate (one request per event) and bulk
//!   (buffered, flushed by size or on a timer)
//! - **Thread safe**: one shipper can be shared by any number of threads
//! - **Best effort**: delivery failures are reported, never retried, and never
//!   surface to the caller
//!
//! ## Example
//!
//! ```no_run
//! use log_shipper::prelude::*;
//! use serde_json::json;
//!
//! let shipper = LogShipper::builder("TOKEN")
//!     .level(LogLevel::Info)
//!     .tags(["svc"])
//!     .bulk(true)
//!     .build()
//!     .expect("valid configuration");
//!
//! shipper.info("service started");
//! shipper.warn_with("disk low", &json!({"free": "2%"}));
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod shipper;
pub mod sinks;
pub mod transport;

pub use crate::core::{
    LogLevel, LogRecord, RecordBuffer, Result, ShipperConfig, ShipperError, ShipperMetrics,
};
pub use global::configure;
pub use shipper::{FatalHandler, LogShipper, ShipperBuilder, DEFAULT_SHUTDOWN_TIMEOUT};

pub mod prelude {
    pub use crate::core::{
        LogLevel, LogRecord, Result, ShipperConfig, ShipperError, ShipperMetrics,
    };
    pub use crate::shipper::{LogShipper, ShipperBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
    pub use crate::sinks::{ConsoleEcho, EchoSink};
    pub use crate::transport::{DeliveryOutcome, HttpTransport, Transport};
}
