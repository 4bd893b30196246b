//! Shipper configuration
//!
//! A [`ShipperConfig`] is built once at startup, validated, and then only
//! read. It fixes the level threshold, the delivery mode, and the ingestion
//! endpoint for the lifetime of the shipper.

use super::error::{Result, ShipperError};
use super::log_level::LogLevel;
use std::time::Duration;

/// Default ingestion host
pub const DEFAULT_ENDPOINT_BASE: &str = "https://logs-01.loggly.com";

/// Default number of buffered records that triggers a bulk flush
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Default period of the time-triggered bulk flush
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Default number of delivery worker threads
pub const DEFAULT_DELIVERY_WORKERS: usize = 2;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const ENV_TOKEN: &str = "LOG_SHIPPER_TOKEN";
const ENV_LEVEL: &str = "LOG_SHIPPER_LEVEL";
const ENV_TAGS: &str = "LOG_SHIPPER_TAGS";
const ENV_BULK: &str = "LOG_SHIPPER_BULK";
const ENV_DEBUG: &str = "LOG_SHIPPER_DEBUG";
const ENV_ENDPOINT: &str = "LOG_SHIPPER_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipperConfig {
    /// Customer token embedded in the endpoint path
    pub token: String,
    /// Minimum level that is echoed and shipped
    pub level: LogLevel,
    /// Scheme and host of the ingestion service, without trailing slash
    pub endpoint_base: String,
    /// Buffer records and upload them in batches instead of one request per event
    pub bulk: bool,
    /// Tags appended to the endpoint path, comma-joined in order
    pub tags: Vec<String>,
    /// Buffer length that triggers a flush in bulk mode
    pub buffer_capacity: usize,
    /// Period of the time-triggered flush in bulk mode
    pub flush_interval: Duration,
    /// Report delivery outcomes locally
    pub debug_echo: bool,
    /// Threads executing deliveries and flush cycles
    pub delivery_workers: usize,
    /// Timeout applied to each outbound request
    pub request_timeout: Duration,
    /// Color the level in echo lines
    pub colors: bool,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            level: LogLevel::Info,
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            bulk: false,
            tags: Vec::new(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            debug_echo: false,
            delivery_workers: DEFAULT_DELIVERY_WORKERS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            colors: false,
        }
    }
}

impl ShipperConfig {
    /// Configuration with the given token and every other field defaulted
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Tags joined with commas, without escaping
    pub fn tag_list(&self) -> String {
        self.tags.join(",")
    }

    /// Ingestion URL derived from mode, token, and tags
    ///
    /// `{base}/bulk/{token}/tag/{tags}/` in bulk mode,
    /// `{base}/inputs/{token}/tag/{tags}/` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use log_shipper::ShipperConfig;
    ///
    /// let mut config = ShipperConfig::new("abc");
    /// config.tags = vec!["svc".to_string(), "prod".to_string()];
    /// assert_eq!(
    ///     config.endpoint_url(),
    ///     "https://logs-01.loggly.com/inputs/abc/tag/svc,prod/"
    /// );
    /// ```
    pub fn endpoint_url(&self) -> String {
        let path = if self.bulk { "bulk" } else { "inputs" };
        format!(
            "{}/{}/{}/tag/{}/",
            self.endpoint_base.trim_end_matches('/'),
            path,
            self.token,
            self.tag_list()
        )
    }

    /// Check the configuration before a shipper is built from it
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ShipperError::config("ShipperConfig", "token must not be empty"));
        }
        if self.endpoint_base.trim().is_empty() {
            return Err(ShipperError::config(
                "ShipperConfig",
                "endpoint_base must not be empty",
            ));
        }
        if self.buffer_capacity == 0 {
            return Err(ShipperError::config(
                "ShipperConfig",
                "buffer_capacity must be positive",
            ));
        }
        if self.flush_interval.is_zero() {
            return Err(ShipperError::config(
                "ShipperConfig",
                "flush_interval must be positive",
            ));
        }
        if self.delivery_workers == 0 {
            return Err(ShipperError::config(
                "ShipperConfig",
                "delivery_workers must be positive",
            ));
        }
        Ok(())
    }

    /// Read the configuration from `LOG_SHIPPER_*` environment variables
    ///
    /// `LOG_SHIPPER_TOKEN` is required. `LOG_SHIPPER_LEVEL`,
    /// `LOG_SHIPPER_TAGS` (comma separated), `LOG_SHIPPER_BULK`,
    /// `LOG_SHIPPER_DEBUG`, and `LOG_SHIPPER_ENDPOINT` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShipperConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ShipperError::config("environment", format!("{} is not set", ENV_TOKEN)))?;

        let mut config = Self::new(token);

        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level
                .parse()
                .map_err(|e: String| ShipperError::config(ENV_LEVEL, e))?;
        }
        if let Some(tags) = lookup(ENV_TAGS) {
            config.tags = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(bulk) = lookup(ENV_BULK) {
            config.bulk = parse_flag(ENV_BULK, &bulk)?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            config.debug_echo = parse_flag(ENV_DEBUG, &debug)?;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint_base = endpoint;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ShipperError::config(
            key,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShipperConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.buffer_capacity, 1000);
        assert_eq!(config.flush_interval, Duration::from_secs(10));
        assert!(!config.bulk);
        assert!(!config.debug_echo);
    }

    #[test]
    fn test_single_endpoint() {
        let mut config = ShipperConfig::new("abc");
        config.tags = vec!["svc".to_string()];
        assert_eq!(config.endpoint_url(), "https://logs-01.loggly.com/inputs/abc/tag/svc/");
    }

    #[test]
    fn test_bulk_endpoint() {
        let mut config = ShipperConfig::new("abc");
        config.bulk = true;
        config.tags = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(config.endpoint_url(), "https://logs-01.loggly.com/bulk/abc/tag/a,b c/");
    }

    #[test]
    fn test_endpoint_without_tags() {
        let mut config = ShipperConfig::new("abc");
        config.endpoint_base = "http://127.0.0.1:8080/".to_string();
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:8080/inputs/abc/tag//");
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let err = ShipperConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity_and_interval() {
        let mut config = ShipperConfig::new("abc");
        config.buffer_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = ShipperConfig::new("abc");
        config.flush_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = ShipperConfig::new("abc");
        config.delivery_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = ShipperConfig::from_lookup(lookup_from(&[
            ("LOG_SHIPPER_TOKEN", "tok"),
            ("LOG_SHIPPER_LEVEL", "warning"),
            ("LOG_SHIPPER_TAGS", "svc, prod,"),
            ("LOG_SHIPPER_BULK", "true"),
            ("LOG_SHIPPER_DEBUG", "0"),
            ("LOG_SHIPPER_ENDPOINT", "http://localhost:9000"),
        ]))
        .unwrap();

        assert_eq!(config.token, "tok");
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.tags, vec!["svc", "prod"]);
        assert!(config.bulk);
        assert!(!config.debug_echo);
        assert_eq!(config.endpoint_url(), "http://localhost:9000/bulk/tok/tag/svc,prod/");
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let err = ShipperConfig::from_lookup(lookup_from(&[("LOG_SHIPPER_BULK", "1")])).unwrap_err();
        assert!(err.to_string().contains("LOG_SHIPPER_TOKEN"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(ShipperConfig::from_lookup(lookup_from(&[
            ("LOG_SHIPPER_TOKEN", "tok"),
            ("LOG_SHIPPER_LEVEL", "loud"),
        ]))
        .is_err());

        assert!(ShipperConfig::from_lookup(lookup_from(&[
            ("LOG_SHIPPER_TOKEN", "tok"),
            ("LOG_SHIPPER_BULK", "maybe"),
        ]))
        .is_err());
    }
}
