//! Basic shipping example
//!
//! Ships each event in its own request and reports delivery outcomes.
//!
//! Run with: LOG_SHIPPER_TOKEN=<token> cargo run --example basic_usage

use log_shipper::prelude::*;
use log_shipper::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Log Shipper - Basic Usage Example ===\n");

    let mut config = ShipperConfig::from_env()?;
    config.debug_echo = true;

    let shipper = LogShipper::builder_from(config)
        .tags(["demo", "basic"])
        .build()?;
    println!("Shipping to {}\n", shipper.endpoint());

    shipper.debug("Below the default threshold, not echoed or shipped");
    shipper.info("Application started");
    shipper.warn_with("Disk usage high", &json!({"mount": "/var", "used": "91%"}));

    let attempt = 3;
    info!(shipper, "Connected after {} attempts", attempt);
    warn!(shipper, "Retrying request {}", attempt + 1);

    if !shipper.shutdown(DEFAULT_SHUTDOWN_TIMEOUT) {
        eprintln!("Warning: some deliveries did not finish in time");
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
