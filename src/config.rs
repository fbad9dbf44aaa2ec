//! Configuration management for ovh-ddns.

use crate::error::{DdnsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default base of the OVH zone API used for record lookups and updates.
pub const DEFAULT_API_BASE_URL: &str = "https://eu.api.ovh.com/1.0/domain/zone/";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Zone API base, ending with a slash (the domain is appended verbatim).
    #[serde(default = "default_api_base_url", alias = "apiBaseUrl")]
    pub api_base_url: String,

    /// OVH API credentials.
    #[serde(alias = "ovhCredentials")]
    pub credentials: Credentials,

    /// Records to keep up to date, processed in order.
    #[serde(default, alias = "dnsRecords")]
    pub records: Vec<UpdateTarget>,

    /// Public IP discovery services.
    #[serde(default, alias = "ipSources")]
    pub ip_sources: IpSources,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// OVH application and consumer keys.
///
/// Any value starting with `$` names an environment variable holding the
/// real value; see [`Credentials::resolved`].
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(alias = "applicationKey")]
    pub application_key: String,
    #[serde(alias = "applicationSecret")]
    pub application_secret: String,
    #[serde(alias = "consumerKey")]
    pub consumer_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("application_key", &self.application_key)
            .field("application_secret", &"<redacted>")
            .field("consumer_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Replace `$VAR` references with the environment values.
    pub fn resolved(&self) -> Self {
        Self {
            application_key: resolve_env(&self.application_key),
            application_secret: resolve_env(&self.application_secret),
            consumer_key: resolve_env(&self.consumer_key),
        }
    }
}

/// One DNS A record to maintain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTarget {
    /// Zone name (e.g., "example.com").
    pub domain: String,
    /// Record name inside the zone (e.g., "www"), empty for the apex.
    pub subdomain: String,
}

impl UpdateTarget {
    pub fn new(domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.into(),
        }
    }

    /// Fully qualified record name.
    pub fn fqdn(&self) -> String {
        if self.subdomain.is_empty() || self.subdomain == "@" {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }
}

/// Primary and fallback public IP services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpSources {
    #[serde(default = "default_primary_source")]
    pub primary: String,
    #[serde(default = "default_fallback_source")]
    pub fallback: String,
}

fn default_primary_source() -> String {
    "https://api.ipify.org".to_string()
}

fn default_fallback_source() -> String {
    "https://ipv4.icanhazip.com/".to_string()
}

impl Default for IpSources {
    fn default() -> Self {
        Self {
            primary: default_primary_source(),
            fallback: default_fallback_source(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DdnsError::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("ovh-ddns").join("config.toml"))
    }

    /// Load configuration from a specific path.
    ///
    /// Returns `Ok(None)` when the file does not exist, so the caller can
    /// offer a sample instead of failing.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let config = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| DdnsError::Config(e.to_string()))?
        } else {
            toml::from_str(&content)?
        };
        Ok(Some(config))
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration.
    pub fn example() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            credentials: Credentials {
                application_key: "YOUR_APPLICATION_KEY".to_string(),
                application_secret: "$OVH_APPLICATION_SECRET".to_string(),
                consumer_key: "$OVH_CONSUMER_KEY".to_string(),
            },
            records: vec![
                UpdateTarget::new("example.com", "www"),
                UpdateTarget::new("example.com", "mail"),
            ],
            ip_sources: IpSources::default(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Resolve environment variable references (values starting with $).
pub(crate) fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}
