//! Console echo implementation

use super::EchoSink;
use crate::core::LogLevel;
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes echo lines to stdout and diagnostics to stderr.
///
/// Colors are off by default so the printed line is exactly the record's
/// echo line.
pub struct ConsoleEcho {
    use_colors: bool,
}

impl ConsoleEcho {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn render(&self, level: LogLevel, line: &str) -> String {
        if !self.use_colors {
            return line.to_string();
        }
        let tag = format!("[{}]", level.to_str());
        let colored_tag = tag.color(level.color_code()).to_string();
        line.replacen(&tag, &colored_tag, 1)
    }

    #[cfg(not(feature = "console"))]
    fn render(&self, _level: LogLevel, line: &str) -> String {
        line.to_string()
    }
}

impl Default for ConsoleEcho {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoSink for ConsoleEcho {
    fn write_line(&self, level: LogLevel, line: &str) {
        let output = self.render(level, line);
        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not turn a log call into a failure
        let _ = writeln!(stdout, "{}", output);
    }

    fn diagnostic(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[SHIPPER] {}", message);
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_is_unchanged() {
        let echo = ConsoleEcho::new();
        let line = "2025-01-08T10:30:45.123Z [WARN] disk low";
        assert_eq!(echo.render(LogLevel::Warn, line), line);
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colored_render_keeps_text() {
        colored::control::set_override(true);
        let echo = ConsoleEcho::with_colors(true);
        let rendered = echo.render(LogLevel::Error, "ts [ERROR] boom");
        colored::control::unset_override();

        assert!(rendered.contains("ERROR"));
        assert!(rendered.ends_with("boom"));
        assert_ne!(rendered, "ts [ERROR] boom");
    }

    #[test]
    fn test_write_line_does_not_panic() {
        let echo = ConsoleEcho::default();
        echo.write_line(LogLevel::Info, "ts [INFO] hello");
        echo.diagnostic("diagnostic output");
        assert_eq!(echo.name(), "console");
    }
}
