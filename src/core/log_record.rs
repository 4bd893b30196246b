//! Log record structure and event formatting

use super::error::Result;
use super::log_level::LogLevel;
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One log event in the shape it is shipped.
///
/// Serializes as
/// `{"timestamp":"...","level":"WARN","message":"...","metadata":null}`.
/// A record is immutable once built; the shipping path takes it by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    timestamp: String,
    level: LogLevel,
    message: String,
    #[serde(default)]
    metadata: Option<Value>,
}

impl LogRecord {
    /// Escape line breaks so one event always echoes as one line
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build a record stamped with the current wall-clock time
    pub fn new(level: LogLevel, message: impl Into<String>, metadata: Option<Value>) -> Self {
        Self::at(&Utc::now(), level, message, metadata)
    }

    /// Build a record stamped with the given time
    pub fn at(
        datetime: &DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        metadata: Option<Value>,
    ) -> Self {
        Self {
            timestamp: timestamp::format_timestamp(datetime),
            level,
            message: message.into(),
            metadata,
        }
    }

    /// Format an event, converting `data` into the record's metadata.
    ///
    /// Fails only when `data` cannot be represented as JSON (for example a
    /// map with non-string keys).
    ///
    /// # Example
    ///
    /// ```
    /// use log_shipper::{LogLevel, LogRecord};
    /// use serde_json::json;
    ///
    /// let record = LogRecord::format("disk low", LogLevel::Warn, Some(&json!({"free": "2%"})))
    ///     .expect("json metadata");
    /// assert!(record.echo_line().ends_with(r#"[WARN] disk low {"free":"2%"}"#));
    /// ```
    pub fn format<T>(message: impl Into<String>, level: LogLevel, data: Option<&T>) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let metadata = data.map(serde_json::to_value).transpose()?;
        Ok(Self::new(level, message, metadata))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Human-readable line printed locally for this event
    ///
    /// `<ts> [<LEVEL>] <message>` or, with metadata,
    /// `<ts> [<LEVEL>] <message> <metadata>`.
    pub fn echo_line(&self) -> String {
        let base = format!(
            "{} [{}] {}",
            self.timestamp,
            self.level.to_str(),
            Self::sanitize_message(&self.message)
        );

        match self.metadata {
            Some(ref data) => format!("{} {}", base, data),
            None => base,
        }
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
