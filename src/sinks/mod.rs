//! Local output for echo lines and self-diagnostics

pub mod console;

pub use console::ConsoleEcho;

use crate::core::LogLevel;

/// Destination of the line printed for every accepted log call.
///
/// `diagnostic` receives the shipper's own reports (delivery outcomes in
/// debug mode, serialization failures) and defaults to stderr.
pub trait EchoSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str);

    fn diagnostic(&self, message: &str) {
        eprintln!("[SHIPPER] {}", message);
    }

    fn name(&self) -> &str;
}
