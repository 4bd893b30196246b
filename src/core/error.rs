//! Error types for the log shipper

pub type Result<T> = std::result::Result<T, ShipperError>;

#[derive(Debug, thiserror::Error)]
pub enum ShipperError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error (thread spawn, local output)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (no response, TLS, timeout, client construction)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Delivery workers are gone
    #[error("Failed to dispatch delivery job: worker queue closed")]
    DispatcherClosed,
}

impl ShipperError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ShipperError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ShipperError::config("ShipperConfig", "token must not be empty");
        assert!(matches!(err, ShipperError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ShipperError::config("ShipperConfig", "buffer_capacity must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for ShipperConfig: buffer_capacity must be positive"
        );

        assert_eq!(
            ShipperError::DispatcherClosed.to_string(),
            "Failed to dispatch delivery job: worker queue closed"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ShipperError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
