//! Process-wide configuration
//!
//! Kept in its own test binary: the global shipper can be installed only
//! once per process.

use log_shipper::{global, ShipperConfig};
use std::sync::Barrier;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn config(token: &str) -> ShipperConfig {
    let mut config = ShipperConfig::new(token);
    config.tags = vec!["svc".to_string()];
    // Nothing listens here; shipping failures stay silent
    config.endpoint_base = "http://127.0.0.1:1".to_string();
    config.request_timeout = Duration::from_millis(200);
    config
}

#[test]
fn test_first_configuration_wins() {
    assert!(!global::is_configured());

    // An invalid configuration installs nothing
    assert!(log_shipper::configure(ShipperConfig::new("")).is_err());
    assert!(!global::is_configured());

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let shipper = log_shipper::configure(config(&format!("token-{}", i))).unwrap();
                shipper.endpoint().to_string()
            })
        })
        .collect();

    let endpoints: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(endpoints.windows(2).all(|w| w[0] == w[1]), "one winner: {:?}", endpoints);

    let winner = global::get().expect("configured").endpoint().to_string();
    assert_eq!(winner, endpoints[0]);

    let again = log_shipper::configure(config("another-token")).unwrap();
    assert_eq!(again.endpoint(), winner);
    assert!(!winner.contains("another-token"));

    global::info("routed to the configured shipper");
    global::debug("below the default threshold");
    assert_eq!(global::get().unwrap().metrics().accepted(), 1);
    assert_eq!(global::get().unwrap().metrics().filtered(), 1);

    log_shipper::warn!(global, "formatted {} of {}", 1, 2);
    log_shipper::log!(global, log_shipper::LogLevel::Error, "code {}", 500);
    log_shipper::debug!(global, "still filtered {}", 3);
    assert_eq!(global::get().unwrap().metrics().accepted(), 3);
    assert_eq!(global::get().unwrap().metrics().filtered(), 2);

    assert!(global::shutdown(Duration::from_secs(5)));
}
