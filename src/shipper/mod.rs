//! Shipping engine: the shipper facade, its delivery workers, and the flush scheduler

pub mod dispatcher;
pub mod log_shipper;
pub mod scheduler;

pub use dispatcher::{Dispatcher, Job};
pub use log_shipper::{FatalHandler, LogShipper, ShipperBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use scheduler::{flush_cycle, FlushScheduler};
