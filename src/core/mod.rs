//! Core types: levels, records, configuration, buffer, metrics, errors

pub mod buffer;
pub mod config;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod metrics;
pub mod timestamp;

pub use buffer::RecordBuffer;
pub use config::ShipperConfig;
pub use error::{Result, ShipperError};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use metrics::ShipperMetrics;
