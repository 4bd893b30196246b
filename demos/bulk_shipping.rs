//! Bulk shipping example
//!
//! Buffers events from several threads and uploads them in batches, either
//! when the buffer fills up or when the flush interval elapses.
//!
//! Run with: LOG_SHIPPER_TOKEN=<token> cargo run --example bulk_shipping

use log_shipper::global;
use log_shipper::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Log Shipper - Bulk Shipping Example ===\n");

    let mut config = ShipperConfig::from_env()?;
    config.bulk = true;
    config.buffer_capacity = 50;
    config.flush_interval = Duration::from_secs(2);
    config.debug_echo = true;

    let shipper = log_shipper::configure(config)?;
    println!("Shipping batches to {}\n", shipper.endpoint());

    let mut handles = vec![];
    for thread_id in 0..4 {
        handles.push(thread::spawn(move || {
            for i in 0..30 {
                global::info(format!("Thread {} - Message {}", thread_id, i));
                thread::sleep(Duration::from_millis(20));
            }
        }));
    }

    for handle in handles {
        let _ = handle.join();
    }

    println!("\n{} records still buffered", shipper.buffered_len());
    thread::sleep(Duration::from_secs(3));

    global::shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    let metrics = shipper.metrics();
    println!(
        "Shipped {} records in {} flush cycles",
        metrics.records_shipped(),
        metrics.flush_cycles()
    );

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
