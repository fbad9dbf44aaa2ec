//! Error types for ovh-ddns.

use thiserror::Error;

/// Result type alias for ovh-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No public IP source answered.
    #[error("Public IP resolution failed: {0}")]
    Resolution(String),

    /// The provider holds no A record for the target.
    #[error("DNS record for {subdomain}.{domain} not found")]
    RecordNotFound { domain: String, subdomain: String },

    /// Non-2xx answer from the provider API.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure (DNS, TLS, timeout, reset).
    #[error("API connection error: {0}")]
    Connection(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Connection(e.to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DdnsError {
    fn from(e: toml::ser::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Serialization(e.to_string())
    }
}
