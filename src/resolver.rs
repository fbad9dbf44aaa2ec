//! Public IP discovery.

use crate::config::IpSources;
use crate::error::{DdnsError, Result};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Resolves the public IPv4 address from a primary service, falling back to
/// exactly one secondary service.
pub struct IpResolver {
    client: reqwest::Client,
    primary: String,
    fallback: String,
}

impl IpResolver {
    /// Create a resolver for the configured sources.
    pub fn new(sources: &IpSources) -> Result<Self> {
        Self::with_sources(sources.primary.clone(), sources.fallback.clone())
    }

    /// Create a resolver with explicit primary and fallback URLs.
    pub fn with_sources(primary: String, fallback: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            primary,
            fallback,
        })
    }

    /// Resolve the public IPv4 address.
    pub async fn resolve(&self) -> Result<Ipv4Addr> {
        match self.try_source(&self.primary).await {
            Ok(ip) => {
                tracing::debug!("Resolved {} from {}", ip, self.primary);
                return Ok(ip);
            }
            Err(e) => tracing::warn!("Source {} failed: {}", self.primary, e),
        }

        self.try_source(&self.fallback).await.map_err(|e| {
            DdnsError::Resolution(format!(
                "primary {} and fallback {} both failed, last error: {}",
                self.primary, self.fallback, e
            ))
        })
    }

    /// Try a single IP service.
    async fn try_source(&self, url: &str) -> Result<Ipv4Addr> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::Resolution(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        let ip_str = text.trim();

        ip_str
            .parse()
            .map_err(|_| DdnsError::Resolution(format!("Invalid IPv4 response: {}", ip_str)))
    }
}
