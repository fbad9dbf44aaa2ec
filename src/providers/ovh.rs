//! OVH zone API client.

use super::{RecordId, ZoneApi};
use crate::config::{Config, Credentials};
use crate::error::{DdnsError, Result};
use crate::signer;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Zone refresh always goes to this host, whatever `api_base_url` says.
pub const REFRESH_BASE_URL: &str = "https://eu.api.ovh.com/1.0/domain/zone/";

/// OVH zone API client.
pub struct OvhClient {
    client: reqwest::Client,
    credentials: Credentials,
    api_base_url: String,
    refresh_base_url: String,
}

#[derive(Debug, Serialize)]
struct UpdateRecordBody {
    target: String,
}

impl OvhClient {
    /// Create a client from configuration, resolving `$VAR` credentials.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            credentials: config.credentials.resolved(),
            api_base_url: config.api_base_url.clone(),
            refresh_base_url: REFRESH_BASE_URL.to_string(),
        })
    }

    /// Override the refresh host (for testing).
    pub fn with_refresh_base_url(mut self, refresh_base_url: String) -> Self {
        self.refresh_base_url = refresh_base_url;
        self
    }

    /// Build a request carrying the OVH authentication headers.
    ///
    /// The URL is parsed once and the signature is computed over the same
    /// serialized form that is sent.
    pub(crate) fn signed_request(
        &self,
        method: Method,
        url: &str,
        body: &str,
    ) -> Result<reqwest::Request> {
        let url = Url::parse(url)
            .map_err(|e| DdnsError::Config(format!("Invalid API URL {}: {}", url, e)))?;
        let timestamp = signer::unix_timestamp();
        let signature = signer::sign(
            &self.credentials.application_secret,
            &self.credentials.consumer_key,
            method.as_str(),
            url.as_str(),
            body,
            timestamp,
        );

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header("X-Ovh-Application", &self.credentials.application_key)
            .header("X-Ovh-Timestamp", timestamp.to_string())
            .header("X-Ovh-Consumer", &self.credentials.consumer_key)
            .header("X-Ovh-Signature", signature);

        if method != Method::GET {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        Ok(builder.build()?)
    }

    /// Send a request, turning non-2xx answers into `DdnsError::Api`.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DdnsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

/// First id of a lookup answer, if it is a usable one.
fn parse_record_ids(content: &str) -> Option<RecordId> {
    match serde_json::from_str::<Vec<i64>>(content) {
        Ok(ids) => {
            let id = ids
                .first()
                .and_then(|id| RecordId::try_from(*id).ok())
                .filter(|id| *id > 0);
            if id.is_none() {
                tracing::info!("No record id in lookup response: {}", content);
            }
            id
        }
        Err(e) => {
            tracing::warn!("Could not parse lookup response {:?}: {}", content, e);
            None
        }
    }
}

#[async_trait]
impl ZoneApi for OvhClient {
    async fn lookup_record_id(&self, domain: &str, subdomain: &str) -> Result<Option<RecordId>> {
        let url = format!(
            "{}{}/record?fieldType=A&subDomain={}",
            self.api_base_url, domain, subdomain
        );

        let request = self.signed_request(Method::GET, &url, "")?;
        let content = self.execute(request).await?.text().await?;
        tracing::debug!("Lookup response for {}.{}: {}", subdomain, domain, content);

        Ok(parse_record_ids(&content))
    }

    async fn update_record_target(
        &self,
        domain: &str,
        record_id: RecordId,
        ip: Ipv4Addr,
    ) -> Result<()> {
        let url = format!("{}{}/record/{}", self.api_base_url, domain, record_id);
        let body = serde_json::to_string(&UpdateRecordBody {
            target: ip.to_string(),
        })?;

        let request = self.signed_request(Method::PUT, &url, &body)?;
        self.execute(request).await?;
        Ok(())
    }

    async fn refresh_zone(&self, domain: &str) -> Result<()> {
        let url = format!("{}{}/refresh", self.refresh_base_url, domain);

        let request = self.signed_request(Method::POST, &url, "")?;
        self.execute(request).await?;
        Ok(())
    }
}
